//! CSV rendering
//!
//! Renders the item rows and summary metrics of a calculation as a CSV
//! document: one row per bill item in bill order, a blank line, then a
//! SUMMARY section of key/value rows. Fields are quoted RFC-4180 style
//! when they contain a comma, quote, or newline. Output is fully
//! deterministic for identical input.
//!
//! No csv crate is used; the layout is a handful of write! calls and a
//! quoting rule, and the engine's projections are already flat.

use std::fmt::Write;

use core_kernel::Money;
use domain_claims::CalculationResult;
use domain_policy::PolicyContext;

/// Renders a calculation result and its policy context as CSV
pub fn render_claim_csv(policy: &PolicyContext, result: &CalculationResult) -> String {
    let mut out = String::new();

    out.push_str("Description,Category,Quantity,Cost,Covered,Rejection Reason\n");
    for row in result.to_rows() {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{}",
            escape_field(&row.description),
            escape_field(row.category.label()),
            row.quantity,
            format_amount(row.cost),
            if row.covered { "Yes" } else { "No" },
            escape_field(row.rejection_reason.as_deref().unwrap_or("")),
        );
    }

    let metrics = result.summary_metrics();
    out.push('\n');
    out.push_str("SUMMARY\n");
    let _ = writeln!(out, "Policy Name,{}", escape_field(policy.policy_name()));
    if let Some(name) = policy.client().name.as_deref() {
        let _ = writeln!(out, "Client Name,{}", escape_field(name));
    }
    if let Some(number) = policy.client().policy_number.as_deref() {
        let _ = writeln!(out, "Policy Number,{}", escape_field(number));
    }
    let _ = writeln!(out, "Copay Percentage,{}%", metrics.copay_percentage);
    let _ = writeln!(out, "Total Billed,{}", format_amount(metrics.total_billed));
    let _ = writeln!(out, "Total Covered,{}", format_amount(metrics.total_covered));
    let _ = writeln!(out, "Total Rejected,{}", format_amount(metrics.total_rejected));
    let _ = writeln!(out, "Approved Amount,{}", format_amount(metrics.approved_amount));
    let _ = writeln!(
        out,
        "Patient Responsibility,{}",
        format_amount(metrics.patient_responsibility)
    );

    out
}

/// Formats an amount at currency precision, without a symbol
fn format_amount(money: Money) -> String {
    let dp = money.currency().decimal_places() as usize;
    format!("{:.dp$}", money.round_to_currency().amount(), dp = dp)
}

/// Quotes a field when it contains a comma, quote, or newline
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
