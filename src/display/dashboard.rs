//! Terminal rendering of the dashboard views

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use super::report::{double_separator, format_bar, format_change, format_percentage, separator};
use crate::analytics::categories::buckets_total;
use crate::analytics::{
    CategoryBucket, DashboardView, ExpenseComparison, MonthlyBar, MonthlyNetPoint, Totals,
};
use crate::models::TransactionType;

const WIDTH: usize = 64;
const BAR_WIDTH: usize = 24;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    label: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Share")]
    share: String,
}

#[derive(Tabled)]
struct NetRow {
    #[tabled(rename = "Month end")]
    month_end: String,
    #[tabled(rename = "Net")]
    monthly_net: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

/// Format the three summary cards
pub fn format_totals(totals: &Totals, symbol: &str) -> String {
    format!(
        "Income:   {:>14}\nExpenses: {:>14}\nNet:      {:>14}\n",
        totals.total_income.format_with_symbol(symbol),
        totals.total_expenses.format_with_symbol(symbol),
        totals.net_balance.format_with_symbol(symbol),
    )
}

/// Format a category breakdown as a table, optionally limited to the top rows
pub fn format_category_table(
    buckets: &[CategoryBucket],
    kind: TransactionType,
    symbol: &str,
    top: Option<usize>,
) -> String {
    let mut output = format!("{} by category\n", kind.label());

    if buckets.is_empty() {
        output.push_str(&format!("  No {} in range.\n", kind.label().to_lowercase()));
        return output;
    }

    let grand_total = buckets_total(buckets);
    let shown = top.unwrap_or(buckets.len()).min(buckets.len());

    let rows: Vec<CategoryRow> = buckets[..shown]
        .iter()
        .map(|bucket| CategoryRow {
            label: bucket.label.clone(),
            amount: bucket.total.format_with_symbol(symbol),
            count: bucket.transaction_count,
            share: format_percentage(bucket.percentage_of(grand_total)),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::new(1..), Alignment::right());
    output.push_str(&table.to_string());
    output.push('\n');

    if shown < buckets.len() {
        output.push_str(&format!("  ... {} more\n", buckets.len() - shown));
    }

    output
}

/// Format the monthly income/expense rows as text bars
pub fn format_trend(bars: &[MonthlyBar], symbol: &str) -> String {
    let mut output = String::from("Monthly trend\n");

    if bars.is_empty() {
        output.push_str("  No activity in range.\n");
        return output;
    }

    let max = bars
        .iter()
        .map(|bar| bar.total.to_decimal())
        .fold(0.0_f64, f64::max);

    for bar in bars {
        let label = match bar.kind {
            TransactionType::In => bar.month.short_label(),
            TransactionType::Out => String::new(),
        };
        output.push_str(&format!(
            "  {:<7} {:<3} {} {:>14}\n",
            label,
            bar.kind.code(),
            format_bar(bar.total.to_decimal(), max, BAR_WIDTH),
            bar.total.format_with_symbol(symbol),
        ));
    }

    output
}

/// Format the cumulative net series as a table
pub fn format_net_series(points: &[MonthlyNetPoint], symbol: &str) -> String {
    let mut output = String::from("Cumulative net balance\n");

    if points.is_empty() {
        output.push_str("  No activity in range.\n");
        return output;
    }

    let rows: Vec<NetRow> = points
        .iter()
        .map(|point| NetRow {
            month_end: point.month_end.format("%Y-%m-%d").to_string(),
            monthly_net: point.monthly_net.format_with_symbol(symbol),
            balance: point.cumulative_balance.format_with_symbol(symbol),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::new(1..), Alignment::right());
    output.push_str(&table.to_string());
    output.push('\n');
    output
}

/// Format the expense comparison line
pub fn format_comparison(comparison: Option<&ExpenseComparison>, symbol: &str) -> String {
    match comparison {
        Some(cmp) => format!(
            "Expenses {} vs {} ({}: {})\n",
            format_change(cmp.percent_change),
            cmp.label,
            cmp.compared_to,
            cmp.previous_expenses.format_with_symbol(symbol),
        ),
        None => "Expense comparison needs a bounded range.\n".to_string(),
    }
}

/// Format the complete dashboard
pub fn format_dashboard(view: &DashboardView, symbol: &str) -> String {
    let mut output = String::new();

    let title = match &view.range {
        Some(range) => format!("Dashboard: {}", range),
        None => "Dashboard: all transactions".to_string(),
    };
    output.push_str(&title);
    output.push('\n');
    output.push_str(&double_separator(WIDTH));
    output.push('\n');

    if view.is_empty() {
        output.push_str("No transactions in range.\n");
        return output;
    }

    output.push_str(&format_totals(&view.totals, symbol));
    output.push_str(&format!("Transactions: {}\n", view.transaction_count));
    output.push_str(&format_comparison(view.expense_comparison.as_ref(), symbol));

    for section in [
        format_category_table(&view.income_by_category, TransactionType::In, symbol, None),
        format_category_table(&view.expenses_by_category, TransactionType::Out, symbol, None),
        format_trend(&view.monthly_trend, symbol),
        format_net_series(&view.monthly_net, symbol),
    ] {
        output.push_str(&separator(WIDTH));
        output.push('\n');
        output.push_str(&section);
    }

    output
}
