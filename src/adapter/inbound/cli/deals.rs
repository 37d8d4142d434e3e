//! Loading deal input files.

use std::path::Path;

use crate::domain::Deal;
use crate::error::Result;

/// Read a JSON array of deals and validate each one.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a JSON array of
/// deals, or any deal breaks a domain invariant.
pub fn load_deals<P: AsRef<Path>>(path: P) -> Result<Vec<Deal>> {
    let content = std::fs::read_to_string(path)?;
    let deals: Vec<Deal> = serde_json::from_str(&content)?;
    for deal in &deals {
        deal.validate()?;
    }
    Ok(deals)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::error::DomainError;
    use crate::error::Error;

    fn write(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_deals_in_file_order() {
        let file = write(
            r#"[
                {"opportunity_id": "b", "sales_agent": "A", "product": "P",
                 "account": "X", "engage_date": "2017-01-01", "close_date": "",
                 "close_value": 1200.5},
                {"opportunity_id": "a", "sales_agent": "B", "product": "Q",
                 "account": "Y", "close_value": 0, "deal_stage": "Engaging"}
            ]"#,
        );

        let deals = load_deals(file.path()).unwrap();

        assert_eq!(deals.len(), 2);
        assert_eq!(deals[0].opportunity_id.as_str(), "b");
        assert_eq!(deals[0].close_value, dec!(1200.5));
        assert_eq!(deals[1].engage_date, "");
        assert_eq!(deals[1].deal_stage.as_deref(), Some("Engaging"));
    }

    #[test]
    fn rejects_negative_close_value() {
        let file = write(
            r#"[{"opportunity_id": "a", "sales_agent": "A", "product": "P",
                 "account": "X", "close_value": -1}]"#,
        );

        assert!(matches!(
            load_deals(file.path()),
            Err(Error::Domain(DomainError::NegativeCloseValue { .. }))
        ));
    }

    #[test]
    fn rejects_non_array_input() {
        let file = write(r#"{"opportunity_id": "a"}"#);
        assert!(matches!(load_deals(file.path()), Err(Error::Json(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            load_deals("/nonexistent/deals.json"),
            Err(Error::Io(_))
        ));
    }
}
