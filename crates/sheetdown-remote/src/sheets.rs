//! Google Sheets v4 REST client
//!
//! Only two read-only calls are made:
//!
//! - `GET spreadsheets/{id}?ranges={title}&includeGridData=true` for the grid
//! - `GET spreadsheets/{id}?fields=sheets.properties(sheetId,title)` for the
//!   worksheet list

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use serde::Deserialize;
use sheetdown_core::{Cell, SheetReference, Table};

use crate::auth::AccessToken;
use crate::error::{RemoteError, Result};
use crate::{GridSource, SheetCatalog};

/// Connection settings for the Sheets API
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// API root, ending in `/`
    pub sheets_base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            sheets_base_url: "https://sheets.googleapis.com/v4/".to_string(),
            timeout: Duration::from_secs(120),
        }
    }
}

/// A worksheet as listed by [`SheetCatalog::list_sheets`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetInfo {
    pub sheet_id: i64,
    pub title: String,
}

/// Blocking Google Sheets client
pub struct SheetsClient {
    http: Client,
    config: GoogleConfig,
}

impl SheetsClient {
    pub fn new(config: GoogleConfig) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    fn spreadsheet_url(&self, spreadsheet_id: &str) -> String {
        format!("{}spreadsheets/{}", self.config.sheets_base_url, spreadsheet_id)
    }

    fn get_json(&self, request: RequestBuilder) -> Result<Spreadsheet> {
        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(RemoteError::Status {
                service: "Google Sheets",
                status: status.as_u16(),
                body,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

impl GridSource for SheetsClient {
    fn fetch_grid(&self, sheet: &SheetReference, token: &AccessToken) -> Result<Table<Cell>> {
        tracing::debug!(
            "fetching grid for '{}' of spreadsheet {}",
            sheet.sheet_title,
            sheet.spreadsheet_id
        );
        let request = self
            .http
            .get(self.spreadsheet_url(&sheet.spreadsheet_id))
            .bearer_auth(token.secret())
            .query(&[
                ("ranges", sheet.sheet_title.as_str()),
                ("includeGridData", "true"),
            ]);
        self.get_json(request)?.into_table(&sheet.sheet_title)
    }
}

impl SheetCatalog for SheetsClient {
    fn list_sheets(&self, spreadsheet_id: &str, token: &AccessToken) -> Result<Vec<SheetInfo>> {
        let request = self
            .http
            .get(self.spreadsheet_url(spreadsheet_id))
            .bearer_auth(token.secret())
            .query(&[("fields", "sheets.properties(sheetId,title)")]);
        Ok(self.get_json(request)?.sheet_infos())
    }
}

// -- Response model (the subset of the Sheets resource we read) --

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Spreadsheet {
    #[serde(default)]
    sheets: Vec<Sheet>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Sheet {
    properties: Option<SheetProperties>,
    #[serde(default)]
    data: Vec<GridData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
    #[serde(default)]
    sheet_id: i64,
    #[serde(default)]
    title: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GridData {
    #[serde(default)]
    row_data: Vec<RowData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RowData {
    values: Option<Vec<CellData>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CellData {
    formatted_value: Option<String>,
    user_entered_value: Option<ExtendedValue>,
    data_validation: Option<DataValidationRule>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExtendedValue {
    formula_value: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DataValidationRule {
    condition: Option<BooleanCondition>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BooleanCondition {
    #[serde(default)]
    values: Vec<ConditionValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConditionValue {
    #[serde(default)]
    user_entered_value: String,
}

impl Spreadsheet {
    /// Grid of the first sheet; rows without `values` are skipped
    fn into_table(self, sheet_title: &str) -> Result<Table<Cell>> {
        let grid = self
            .sheets
            .into_iter()
            .next()
            .and_then(|sheet| sheet.data.into_iter().next())
            .ok_or_else(|| RemoteError::NoSheetData(sheet_title.to_string()))?;

        let rows = grid
            .row_data
            .into_iter()
            .filter_map(|row| row.values)
            .map(|values| values.into_iter().map(CellData::into_cell).collect::<Vec<_>>())
            .collect();
        Ok(Table::from_rows(rows))
    }

    fn sheet_infos(self) -> Vec<SheetInfo> {
        self.sheets
            .into_iter()
            .filter_map(|sheet| sheet.properties)
            .map(|p| SheetInfo {
                sheet_id: p.sheet_id,
                title: p.title,
            })
            .collect()
    }
}

impl CellData {
    fn into_cell(self) -> Cell {
        let formula = self
            .user_entered_value
            .and_then(|v| v.formula_value)
            .filter(|f| !f.is_empty());
        let options = self
            .data_validation
            .and_then(|v| v.condition)
            .map(|c| c.values)
            .unwrap_or_default()
            .into_iter()
            .map(|v| v.user_entered_value)
            .filter(|v| !v.is_empty());

        Cell {
            display_value: self.formatted_value.unwrap_or_default(),
            formula,
            dropdown_options: options.collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(json: &str) -> Spreadsheet {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_grid_conversion() {
        let spreadsheet = parse(
            r#"{
              "sheets": [{
                "properties": {"sheetId": 0, "title": "Sheet1"},
                "data": [{
                  "rowData": [
                    {"values": [{"formattedValue": "Name"}, {"formattedValue": "Total"}, {"formattedValue": "Status"}]},
                    {},
                    {"values": [
                      {"formattedValue": "Alice"},
                      {"formattedValue": "30", "userEnteredValue": {"formulaValue": "=SUM(B1:B3)"}},
                      {"formattedValue": "Open", "dataValidation": {"condition": {
                        "type": "ONE_OF_LIST",
                        "values": [{"userEnteredValue": "Open"}, {"userEnteredValue": "Closed"}]
                      }}}
                    ]},
                    {"values": [{}, {"userEnteredValue": {"stringValue": "x"}, "formattedValue": "x"}]}
                  ]
                }]
              }]
            }"#,
        );

        let table = spreadsheet.into_table("Sheet1").unwrap();
        assert_eq!(table.row_count(), 3);
        assert_eq!(
            table.rows()[1],
            vec![
                Cell::new("Alice"),
                Cell::new("30").with_formula("=SUM(B1:B3)"),
                Cell::new("Open").with_options(["Open", "Closed"]),
            ]
        );
        assert_eq!(table.rows()[2], vec![Cell::new(""), Cell::new("x")]);
    }

    #[test]
    fn test_empty_dropdown_options_are_dropped() {
        let spreadsheet = parse(
            r#"{
              "sheets": [{
                "data": [{
                  "rowData": [
                    {"values": [{"formattedValue": "a", "dataValidation": {"condition": {
                      "type": "ONE_OF_LIST",
                      "values": [{}, {"userEnteredValue": ""}, {"userEnteredValue": "a"}]
                    }}}]},
                    {"values": [{"formattedValue": "b", "dataValidation": {"condition": {
                      "type": "ONE_OF_LIST",
                      "values": [{"userEnteredValue": ""}]
                    }}}]}
                  ]
                }]
              }]
            }"#,
        );

        let table = spreadsheet.into_table("Sheet1").unwrap();
        assert_eq!(table.rows()[0], vec![Cell::new("a").with_options(["a"])]);
        assert_eq!(table.rows()[1], vec![Cell::new("b")]);
        assert!(!table.rows()[1][0].has_dropdown());
    }

    #[test]
    fn test_empty_grid_is_empty_table() {
        let table = parse(r#"{"sheets": [{"data": [{}]}]}"#)
            .into_table("Sheet1")
            .unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_missing_sheet_data() {
        let err = parse(r#"{"sheets": []}"#).into_table("Gone").unwrap_err();
        assert!(matches!(err, RemoteError::NoSheetData(title) if title == "Gone"));
    }

    #[test]
    fn test_sheet_infos() {
        let infos = parse(
            r#"{"sheets": [
                {"properties": {"sheetId": 0, "title": "Sheet1"}},
                {"properties": {"sheetId": 918, "title": "Vehicles"}}
            ]}"#,
        )
        .sheet_infos();
        assert_eq!(
            infos,
            vec![
                SheetInfo { sheet_id: 0, title: "Sheet1".to_string() },
                SheetInfo { sheet_id: 918, title: "Vehicles".to_string() },
            ]
        );
    }
}
