//! Balance sheet, cash flow, and earnings response types
//!
//! Upstream sends every figure as a string ("None" for missing values), so
//! the fields stay strings here and are formatted or parsed at the point of
//! use.

use serde::{Deserialize, Serialize};

/// Balance sheet API response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceSheetResponse {
    #[serde(default)]
    pub symbol: String,
    #[serde(rename = "annualReports", default)]
    pub annual_reports: Vec<BalanceSheetReport>,
    #[serde(rename = "quarterlyReports", default)]
    pub quarterly_reports: Vec<BalanceSheetReport>,
}

/// A single balance sheet report
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheetReport {
    #[serde(default)]
    pub fiscal_date_ending: String,
    #[serde(default)]
    pub reported_currency: String,
    #[serde(default)]
    pub total_assets: String,
    #[serde(default)]
    pub total_current_assets: String,
    #[serde(default)]
    pub cash_and_cash_equivalents_at_carrying_value: String,
    #[serde(default)]
    pub cash_and_short_term_investments: String,
    #[serde(default)]
    pub inventory: String,
    #[serde(default)]
    pub current_net_receivables: String,
    #[serde(default)]
    pub total_non_current_assets: String,
    #[serde(default)]
    pub property_plant_equipment: String,
    #[serde(default)]
    pub intangible_assets: String,
    #[serde(default)]
    pub goodwill: String,
    #[serde(default)]
    pub investments: String,
    #[serde(default)]
    pub long_term_investments: String,
    #[serde(default)]
    pub short_term_investments: String,
    #[serde(default)]
    pub total_liabilities: String,
    #[serde(default)]
    pub total_current_liabilities: String,
    #[serde(default)]
    pub current_accounts_payable: String,
    #[serde(default)]
    pub deferred_revenue: String,
    #[serde(default)]
    pub current_debt: String,
    #[serde(default)]
    pub short_term_debt: String,
    #[serde(default)]
    pub total_non_current_liabilities: String,
    #[serde(default)]
    pub capital_lease_obligations: String,
    #[serde(default)]
    pub long_term_debt: String,
    #[serde(default)]
    pub current_long_term_debt: String,
    #[serde(default)]
    pub long_term_debt_noncurrent: String,
    #[serde(default)]
    pub short_long_term_debt_total: String,
    #[serde(default)]
    pub total_shareholder_equity: String,
    #[serde(default)]
    pub treasury_stock: String,
    #[serde(default)]
    pub retained_earnings: String,
    #[serde(default)]
    pub common_stock: String,
    #[serde(default)]
    pub common_stock_shares_outstanding: String,
}

/// Cash flow API response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CashFlowResponse {
    #[serde(default)]
    pub symbol: String,
    #[serde(rename = "annualReports", default)]
    pub annual_reports: Vec<CashFlowReport>,
    #[serde(rename = "quarterlyReports", default)]
    pub quarterly_reports: Vec<CashFlowReport>,
}

/// A single cash flow report
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowReport {
    #[serde(default)]
    pub fiscal_date_ending: String,
    #[serde(default)]
    pub reported_currency: String,
    #[serde(default)]
    pub operating_cashflow: String,
    #[serde(default)]
    pub payments_for_operating_activities: String,
    #[serde(default)]
    pub change_in_operating_liabilities: String,
    #[serde(default)]
    pub change_in_operating_assets: String,
    #[serde(default)]
    pub depreciation_depletion_and_amortization: String,
    #[serde(default)]
    pub capital_expenditures: String,
    #[serde(default)]
    pub change_in_receivables: String,
    #[serde(default)]
    pub change_in_inventory: String,
    #[serde(default)]
    pub profit_loss: String,
    #[serde(default)]
    pub cashflow_from_investment: String,
    #[serde(default)]
    pub cashflow_from_financing: String,
    #[serde(default)]
    pub payments_for_repurchase_of_common_stock: String,
    #[serde(default)]
    pub payments_for_repurchase_of_equity: String,
    #[serde(default)]
    pub dividend_payout: String,
    #[serde(default)]
    pub dividend_payout_common_stock: String,
    #[serde(default)]
    pub proceeds_from_issuance_of_common_stock: String,
    #[serde(default)]
    pub proceeds_from_repurchase_of_equity: String,
    #[serde(default)]
    pub change_in_cash_and_cash_equivalents: String,
    #[serde(default)]
    pub change_in_exchange_rate: String,
    #[serde(default)]
    pub net_income: String,
}

/// Earnings API response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EarningsResponse {
    #[serde(default)]
    pub symbol: String,
    #[serde(rename = "annualEarnings", default)]
    pub annual_earnings: Vec<AnnualEarning>,
    #[serde(rename = "quarterlyEarnings", default)]
    pub quarterly_earnings: Vec<QuarterlyEarning>,
}

/// Annual earnings record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualEarning {
    #[serde(default)]
    pub fiscal_date_ending: String,
    #[serde(rename = "reportedEPS", default)]
    pub reported_eps: String,
}

/// Quarterly earnings record with estimate and surprise
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterlyEarning {
    #[serde(default)]
    pub fiscal_date_ending: String,
    #[serde(default)]
    pub reported_date: String,
    #[serde(rename = "reportedEPS", default)]
    pub reported_eps: String,
    #[serde(rename = "estimatedEPS", default)]
    pub estimated_eps: String,
    #[serde(default)]
    pub surprise: String,
    #[serde(default)]
    pub surprise_percentage: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_earnings_deserializes_upstream_shape() {
        let body = r#"{
            "symbol": "IBM",
            "annualEarnings": [
                {"fiscalDateEnding": "2023-12-31", "reportedEPS": "9.62"}
            ],
            "quarterlyEarnings": [
                {
                    "fiscalDateEnding": "2023-12-31",
                    "reportedDate": "2024-01-24",
                    "reportedEPS": "3.87",
                    "estimatedEPS": "3.78",
                    "surprise": "0.09",
                    "surprisePercentage": "2.38"
                }
            ]
        }"#;
        let resp: EarningsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.symbol, "IBM");
        assert_eq!(resp.annual_earnings[0].reported_eps, "9.62");
        assert_eq!(resp.quarterly_earnings[0].surprise, "0.09");
    }

    #[test]
    fn test_balance_sheet_tolerates_missing_fields() {
        let body = r#"{
            "symbol": "IBM",
            "annualReports": [
                {"fiscalDateEnding": "2023-12-31", "totalAssets": "135241000000"}
            ]
        }"#;
        let resp: BalanceSheetResponse = serde_json::from_str(body).unwrap();
        let report = &resp.annual_reports[0];
        assert_eq!(report.total_assets, "135241000000");
        // Missing optional fields default to empty strings
        assert!(report.total_liabilities.is_empty());
        assert!(resp.quarterly_reports.is_empty());
    }
}
