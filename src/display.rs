//! Read-only display projection of a parsed invoice.
//!
//! Every monetary and percentage field carries a formatted string
//! alongside the raw value; nothing from the source record is discarded,
//! and the projection is never fed back into parsing or validation.
//!
//! Formatting is fixed-locale (`$1,234.56`, `16.00%`, `dd/mm/yyyy`) so the
//! output is stable across environments.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::core::{FactorType, Invoice, TaxDetail};

/// Display projection of one [`Invoice`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceDisplay {
    pub total: Decimal,
    pub total_formatted: String,
    pub subtotal: Decimal,
    pub subtotal_formatted: String,
    pub total_taxes_transferred: Option<Decimal>,
    pub total_taxes_transferred_formatted: Option<String>,
    pub total_taxes_withheld: Option<Decimal>,
    pub total_taxes_withheld_formatted: Option<String>,
    /// `"{serie}-{folio}"` when a serie is present, bare folio otherwise.
    pub full_folio: String,
    /// Issue date exactly as found in the document.
    pub issue_date: String,
    /// `dd/mm/yyyy` when the raw date parses as ISO-like text, the raw
    /// string unchanged otherwise.
    pub issue_date_formatted: String,
    pub taxes: Vec<TaxDisplay>,
}

/// Display projection of one [`TaxDetail`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxDisplay {
    /// The source entry, carried whole — raw values stay available.
    pub detail: TaxDetail,
    /// `"16.00%"` for rates, a currency amount for quotas, `"Exempt"`,
    /// or `"N/A"` when no rate was recorded.
    pub rate_formatted: String,
    pub amount_formatted: Option<String>,
    pub base_formatted: Option<String>,
    /// Composite one-liner, e.g. `"IVA 16.00% (Transferred)"`.
    pub description: String,
}

/// Project an invoice for presentation. Pure; calling it twice yields
/// structurally equal results.
pub fn format_invoice(invoice: &Invoice) -> InvoiceDisplay {
    let currency = invoice.currency.as_str();

    InvoiceDisplay {
        total: invoice.total,
        total_formatted: format_currency(invoice.total, currency),
        subtotal: invoice.subtotal,
        subtotal_formatted: format_currency(invoice.subtotal, currency),
        total_taxes_transferred: invoice.total_taxes_transferred,
        total_taxes_transferred_formatted: invoice
            .total_taxes_transferred
            .map(|amount| format_currency(amount, currency)),
        total_taxes_withheld: invoice.total_taxes_withheld,
        total_taxes_withheld_formatted: invoice
            .total_taxes_withheld
            .map(|amount| format_currency(amount, currency)),
        full_folio: full_folio(invoice.serie.as_deref(), &invoice.folio),
        issue_date: invoice.issue_date.clone(),
        issue_date_formatted: format_issue_date(&invoice.issue_date),
        taxes: invoice
            .taxes
            .iter()
            .map(|detail| format_tax(detail, currency))
            .collect(),
    }
}

fn format_tax(detail: &TaxDetail, currency: &str) -> TaxDisplay {
    let rate_formatted = format_rate(detail, currency);
    let description = format!(
        "{} {} ({})",
        detail.tax_name,
        rate_formatted,
        detail.kind.label()
    );

    TaxDisplay {
        detail: detail.clone(),
        rate_formatted,
        amount_formatted: detail
            .amount
            .map(|amount| format_currency(amount, currency)),
        base_formatted: detail.base.map(|base| format_currency(base, currency)),
        description,
    }
}

/// Format a tax line's rate-or-quota. Exempt entries read `"Exempt"`
/// whether or not a value was recorded; other entries without a recorded
/// value read `"N/A"`.
pub fn format_rate(detail: &TaxDetail, currency: &str) -> String {
    match (detail.factor_type, detail.rate_or_quota) {
        (FactorType::Exempt, _) => "Exempt".to_string(),
        (_, None) => "N/A".to_string(),
        (FactorType::Rate, Some(rate)) => format_percent(rate),
        (FactorType::Quota, Some(quota)) => format_currency(quota, currency),
    }
}

/// Format a fraction as a percentage with exactly two decimals
/// (`0.16` → `"16.00%"`).
pub fn format_percent(rate: Decimal) -> String {
    format!("{}%", fixed_two(rate * dec!(100)))
}

/// Format an amount in the given ISO 4217 currency: symbol prefix for
/// known currencies (`"$1,234.56"`), `"CODE 1,234.56"` otherwise.
pub fn format_currency(amount: Decimal, currency: &str) -> String {
    let sign = if amount.is_sign_negative() { "-" } else { "" };
    let grouped = group_thousands(&fixed_two(amount.abs()));
    match currency_symbol(currency) {
        Some(symbol) => format!("{sign}{symbol}{grouped}"),
        None => format!("{sign}{currency} {grouped}"),
    }
}

/// Currencies rendered with a symbol prefix; everything else falls back
/// to its ISO code.
static CURRENCY_SYMBOLS: &[(&str, &str)] = &[("EUR", "€"), ("GBP", "£"), ("MXN", "$"), ("USD", "$")];

fn currency_symbol(code: &str) -> Option<&'static str> {
    CURRENCY_SYMBOLS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, symbol)| *symbol)
}

fn full_folio(serie: Option<&str>, folio: &str) -> String {
    match serie {
        Some(serie) if !serie.is_empty() => format!("{serie}-{folio}"),
        _ => folio.to_string(),
    }
}

fn format_issue_date(raw: &str) -> String {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.date())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .map(|date| date.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// Render with exactly two decimal places.
fn fixed_two(value: Decimal) -> String {
    let s = value.round_dp(2).to_string();
    match s.find('.') {
        Some(dot) => {
            let decimals = s.len() - dot - 1;
            if decimals < 2 {
                format!("{s}{}", "0".repeat(2 - decimals))
            } else {
                s
            }
        }
        None => format!("{s}.00"),
    }
}

/// Insert thousands separators into an unsigned `"1234.56"`-shaped string.
fn group_thousands(s: &str) -> String {
    let (int_part, frac_part) = match s.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (s, None),
    };

    let mut grouped = String::with_capacity(s.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_two_cases() {
        assert_eq!(fixed_two(dec!(100)), "100.00");
        assert_eq!(fixed_two(dec!(49.9)), "49.90");
        assert_eq!(fixed_two(dec!(1833.48)), "1833.48");
        assert_eq!(fixed_two(dec!(16.000000)), "16.00");
        assert_eq!(fixed_two(dec!(0)), "0.00");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands("1234.56"), "1,234.56");
        assert_eq!(group_thousands("123.00"), "123.00");
        assert_eq!(group_thousands("1234567.89"), "1,234,567.89");
        assert_eq!(group_thousands("100"), "100");
    }

    #[test]
    fn currency_known_and_unknown() {
        assert_eq!(format_currency(dec!(1234.56), "MXN"), "$1,234.56");
        assert_eq!(format_currency(dec!(32), "USD"), "$32.00");
        assert_eq!(format_currency(dec!(99.9), "EUR"), "€99.90");
        assert_eq!(format_currency(dec!(50), "JPY"), "JPY 50.00");
    }

    #[test]
    fn currency_negative_amount() {
        assert_eq!(format_currency(dec!(-1234.5), "MXN"), "-$1,234.50");
    }

    #[test]
    fn percent_two_decimals() {
        assert_eq!(format_percent(dec!(0.16)), "16.00%");
        assert_eq!(format_percent(dec!(0.080000)), "8.00%");
        assert_eq!(format_percent(dec!(0)), "0.00%");
    }

    #[test]
    fn folio_composition() {
        assert_eq!(full_folio(Some("A"), "123"), "A-123");
        assert_eq!(full_folio(None, "123"), "123");
        assert_eq!(full_folio(Some(""), "123"), "123");
    }

    #[test]
    fn issue_date_formats() {
        assert_eq!(format_issue_date("2024-06-15T14:23:05"), "15/06/2024");
        assert_eq!(format_issue_date("2024-06-15"), "15/06/2024");
        assert_eq!(format_issue_date("not a date"), "not a date");
        assert_eq!(format_issue_date(""), "");
    }
}
