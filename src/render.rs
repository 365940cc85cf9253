use crate::slider::DaySlider;
use crate::widget::WidgetView;

pub fn render_rows_as_text_table(rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return "(empty timetable)\n".to_string();
    }

    // Ragged rows are padded out to the widest row
    let column_count = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; column_count];
    for row in rows {
        for (ci, cell) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(cell.chars().count());
        }
    }

    let mut sep = String::new();
    sep.push('+');
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');

    for (ri, row) in rows.iter().enumerate() {
        out.push('|');
        for (ci, width) in widths.iter().enumerate() {
            let cell = row.get(ci).map(String::as_str).unwrap_or("");
            out.push(' ');
            out.push_str(cell);
            let pad = width.saturating_sub(cell.chars().count());
            if pad > 0 {
                out.push_str(&" ".repeat(pad));
            }
            out.push(' ');
            out.push('|');
        }
        out.push('\n');
        // First row is the header
        if ri == 0 && rows.len() > 1 {
            out.push_str(&sep);
            out.push('\n');
        }
    }

    out.push_str(&sep);
    out.push('\n');
    out
}

pub fn render_view(view: &WidgetView<'_>, panel_rows: usize) -> String {
    match view {
        WidgetView::Slider { day, label } => {
            format!("Time Table\n< {label} ({}/{}) >\n", day + 1, DaySlider::DAY_COUNT)
        }
        WidgetView::Csv { rows, expanded: true } => {
            format!("Time Table [expanded]\n{}", render_rows_as_text_table(rows))
        }
        WidgetView::Csv {
            rows,
            expanded: false,
        } => {
            let shown = panel_rows.max(1).min(rows.len());
            let mut out = format!("Time Table\n{}", render_rows_as_text_table(&rows[..shown]));
            let hidden = rows.len() - shown;
            if hidden > 0 {
                out.push_str(&format!("... {hidden} more rows (expand to see all)\n"));
            }
            out
        }
        WidgetView::Image { image, expanded } => {
            let marker = if *expanded { " [expanded]" } else { "" };
            format!(
                "Time Table{marker}\nimage {} ({}, {} bytes)\n",
                image.file_name,
                image.media_type,
                image.len()
            )
        }
    }
}
