//! Print-ready HTML renderer.
//!
//! The document is self-contained (inline `<style>`) and calls
//! `window.print()` once loaded.

use chrono::NaiveDateTime;

use projex_shared::format::{format_date, format_datetime, format_money};

use crate::project::ProjectRow;
use crate::reports::FinancialSummary;

/// Render rows and totals as a printable HTML document
pub fn render_html(
    title: &str,
    rows: &[ProjectRow],
    summary: &FinancialSummary,
    generated_at: NaiveDateTime,
) -> String {
    let title = escape_html(title);
    let mut html = String::new();

    html.push_str(&format!(
        r#"<!DOCTYPE html>
<html lang="ru">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>
        body {{
            font-family: Arial, sans-serif;
            color: #333;
            margin: 20px;
        }}
        h1 {{
            color: #2c3e50;
            border-bottom: 3px solid #3498db;
            padding-bottom: 10px;
        }}
        .generated {{
            color: #7f8c8d;
            font-size: 0.9em;
        }}
        .metrics {{
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
            gap: 15px;
            margin: 20px 0;
        }}
        .metric {{
            background-color: #f8f9fa;
            border-left: 4px solid #3498db;
            border-radius: 6px;
            padding: 12px;
        }}
        .metric-label {{
            font-size: 0.85em;
            color: #7f8c8d;
        }}
        .metric-value {{
            font-size: 1.3em;
            font-weight: bold;
        }}
        .project {{
            border: 1px solid #ddd;
            border-radius: 6px;
            padding: 15px;
            margin-bottom: 15px;
            page-break-inside: avoid;
        }}
        .project h2 {{
            margin: 0 0 10px 0;
            font-size: 1.1em;
        }}
        .status {{
            display: inline-block;
            padding: 2px 8px;
            border-radius: 4px;
            background-color: #ecf0f1;
            font-size: 0.85em;
        }}
        .field {{
            display: flex;
            justify-content: space-between;
            border-bottom: 1px dotted #eee;
            padding: 3px 0;
        }}
        .label {{
            color: #7f8c8d;
        }}
        @media print {{
            body {{ margin: 0; }}
        }}
    </style>
</head>
<body>
    <h1>{title}</h1>
    <p class="generated">Дата формирования: {generated}</p>
"#,
        generated = format_datetime(generated_at),
    ));

    render_metrics(&mut html, summary);

    for row in rows {
        render_card(&mut html, row);
    }

    html.push_str(
        r"    <script>
        window.onload = function () { window.print(); };
    </script>
</body>
</html>
",
    );

    html
}

fn render_metrics(html: &mut String, summary: &FinancialSummary) {
    let metrics = [
        ("Всего проектов", summary.project_count.to_string()),
        ("Общая стоимость", format_money(summary.total_cost)),
        ("Оплачено", format_money(summary.total_paid)),
        ("Остаток", format_money(summary.total_remaining)),
        ("Расходы на исполнителей", format_money(summary.total_executor_cost)),
        ("Прибыль", format_money(summary.total_profit)),
    ];

    html.push_str("    <div class=\"metrics\">\n");
    for (label, value) in metrics {
        html.push_str(&format!(
            "        <div class=\"metric\"><div class=\"metric-label\">{label}</div><div class=\"metric-value\">{}</div></div>\n",
            escape_html(&value)
        ));
    }
    html.push_str("    </div>\n");
}

fn render_card(html: &mut String, row: &ProjectRow) {
    let f = &row.financials;
    html.push_str("    <div class=\"project\">\n");
    html.push_str(&format!(
        "        <h2>#{} {}</h2>\n        <span class=\"status\">{}</span>\n",
        row.id,
        escape_html(&row.name),
        escape_html(row.status.label())
    ));

    let mut fields = vec![
        ("Стоимость", format_money(f.cost)),
        ("Оплачено", format_money(f.paid)),
        ("Остаток", format_money(f.remaining)),
        ("Стоимость исполнителя", format_money(f.executor_cost)),
        ("Прибыль", format_money(f.profit)),
    ];
    // Optional blocks are omitted rather than shown empty.
    if let Some(deadline) = row.deadline {
        fields.push(("Дедлайн", format_date(deadline)));
    }
    if let Some(executor) = &row.executor {
        fields.push(("Исполнитель", executor.clone()));
    }
    if let Some(client) = &row.client {
        fields.push(("Клиент", client.clone()));
    }

    for (label, value) in fields {
        html.push_str(&format!(
            "        <div class=\"field\"><span class=\"label\">{label}</span><span class=\"value\">{}</span></div>\n",
            escape_html(&value)
        ));
    }

    let description = row.description.trim();
    if !description.is_empty() {
        html.push_str(&format!(
            "        <p class=\"description\">{}</p>\n",
            escape_html(description)
        ));
    }
    html.push_str("    </div>\n");
}

/// Escape HTML special characters
fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
