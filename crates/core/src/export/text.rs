//! Plain-text report renderer (the "PDF" export).

use chrono::NaiveDateTime;

use projex_shared::format::{format_date, format_datetime, format_money, format_number};

use crate::project::{NOT_SPECIFIED, ProjectRow};
use crate::reports::FinancialSummary;

/// Width of banner separators.
pub const LINE_WIDTH: usize = 80;

/// Renders a titled text report: banner, one block per project, totals.
pub fn render_text(
    title: &str,
    rows: &[ProjectRow],
    summary: &FinancialSummary,
    generated_at: NaiveDateTime,
) -> String {
    let heavy = "=".repeat(LINE_WIDTH);
    let light = "-".repeat(LINE_WIDTH);
    let mut out = String::new();

    out.push_str(&format!("{heavy}\n{}\n{heavy}\n", center(&single_line(title))));
    out.push_str(&format!(
        "Дата формирования: {}\n",
        format_datetime(generated_at)
    ));
    out.push_str(&format!("Количество проектов: {}\n\n", rows.len()));

    for row in rows {
        render_block(&mut out, row, &light);
    }

    out.push_str(&format!("{heavy}\n{}\n{heavy}\n", center("ОБЩАЯ СТАТИСТИКА")));
    let totals = [
        ("Всего проектов", summary.project_count.to_string()),
        ("Завершено", summary.completed_count.to_string()),
        ("В работе", summary.in_progress_count.to_string()),
        ("Общая стоимость", format_money(summary.total_cost)),
        ("Оплачено", format_money(summary.total_paid)),
        ("Остаток к оплате", format_money(summary.total_remaining)),
        ("Расходы на исполнителей", format_money(summary.total_executor_cost)),
        ("Прибыль", format_money(summary.total_profit)),
        ("Средняя стоимость", format_money(summary.average_cost)),
        (
            "Рентабельность",
            format!("{}%", format_number(summary.profit_margin_percent)),
        ),
    ];
    for (label, value) in totals {
        out.push_str(&format!("{label}: {value}\n"));
    }
    out.push_str(&format!("{heavy}\n"));

    out
}

fn render_block(out: &mut String, row: &ProjectRow, separator: &str) {
    let f = &row.financials;
    out.push_str(&format!(
        "Проект #{}: {}\n{separator}\n",
        row.id,
        single_line(&row.name)
    ));

    let mut fields = vec![
        ("Статус", row.status.label().to_string()),
        ("Стоимость", format_money(f.cost)),
        ("Оплачено", format_money(f.paid)),
        ("Остаток", format_money(f.remaining)),
        ("Стоимость исполнителя", format_money(f.executor_cost)),
        ("Прибыль", format_money(f.profit)),
        ("Исполнитель", single_line(row.executor_name())),
        ("Клиент", single_line(row.client_name())),
        (
            "Дедлайн",
            row.deadline
                .map_or_else(|| NOT_SPECIFIED.to_string(), format_date),
        ),
    ];
    if let Some(created) = row.created_at {
        fields.push(("Создан", format_date(created)));
    }
    let description = row.description.trim();
    if !description.is_empty() {
        fields.push(("Описание", single_line(description)));
    }

    for (label, value) in fields {
        out.push_str(&format!("{label}: {value}\n"));
    }
    out.push('\n');
}

/// Collapses line breaks so one value stays on one report line.
fn single_line(text: &str) -> String {
    text.split(['\r', '\n'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn center(text: &str) -> String {
    let len = text.chars().count();
    if len >= LINE_WIDTH {
        return text.to_string();
    }
    format!("{}{text}", " ".repeat((LINE_WIDTH - len) / 2))
}
