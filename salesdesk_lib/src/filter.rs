//! Client-side search over the records of the loaded page.

use salesdesk_api::types::SalesOrder;

/// A record that exposes the field the search box matches against.
pub trait Searchable {
    fn search_field(&self) -> Option<&str>;
}

impl Searchable for SalesOrder {
    fn search_field(&self) -> Option<&str> {
        self.customer_name()
    }
}

/// Keeps the records whose field contains `term`, ignoring case.
///
/// The term is trimmed first; a blank term keeps every record in order.
/// A record without the field never matches a non-blank term.
pub fn filter_by<'a, T, F>(records: &'a [T], term: &str, field: F) -> Vec<&'a T>
where
    F: Fn(&T) -> Option<&str>,
{
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|record| {
            field(record)
                .map(|value| value.to_lowercase().contains(&needle))
                .unwrap_or(false)
        })
        .collect()
}

pub fn filter_records<'a, T: Searchable>(records: &'a [T], term: &str) -> Vec<&'a T> {
    filter_by(records, term, T::search_field)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(Option<&'static str>);

    impl Searchable for Row {
        fn search_field(&self) -> Option<&str> {
            self.0
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row(Some("Asha Traders")),
            Row(None),
            Row(Some("Northwind Retail")),
            Row(Some("ASHOK Stores")),
        ]
    }

    fn names(filtered: &[&Row]) -> Vec<Option<&'static str>> {
        filtered.iter().map(|r| r.0).collect()
    }

    #[test]
    fn empty_term_is_identity() {
        let rows = rows();
        let filtered = filter_records(&rows, "");
        assert_eq!(filtered.len(), rows.len());
        assert_eq!(names(&filtered), rows.iter().map(|r| r.0).collect::<Vec<_>>());

        assert_eq!(filter_records(&rows, "   ").len(), rows.len());
    }

    #[test]
    fn match_is_case_insensitive() {
        let rows = rows();
        let upper = names(&filter_records(&rows, "ASH"));
        let lower = names(&filter_records(&rows, "ash"));
        assert_eq!(upper, lower);
        assert_eq!(upper, vec![Some("Asha Traders"), Some("ASHOK Stores")]);
    }

    #[test]
    fn term_is_trimmed() {
        let rows = rows();
        assert_eq!(
            names(&filter_records(&rows, "  north ")),
            vec![Some("Northwind Retail")]
        );
    }

    #[test]
    fn missing_field_never_matches() {
        let rows = vec![Row(None), Row(None)];
        assert!(filter_records(&rows, "a").is_empty());
        assert_eq!(filter_records(&rows, "").len(), 2);
    }

    #[test]
    fn no_match_yields_empty() {
        assert!(filter_records(&rows(), "zzz").is_empty());
    }

    #[test]
    fn filter_by_uses_given_field() {
        let words = ["alpha", "beta", "gamma"];
        let filtered = filter_by(&words, "MA", |w| Some(*w));
        assert_eq!(filtered, vec![&"gamma"]);
    }

    #[test]
    fn sales_orders_match_customer_display_name() {
        let orders: Vec<SalesOrder> = serde_json::from_value(serde_json::json!([
            { "id": "1", "customer": { "name": "Asha Traders" } },
            { "id": "2", "customer": { "companyName": "Northwind Retail" } },
            { "id": "3" }
        ]))
        .unwrap();
        let filtered = filter_records(&orders, "retail");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id(), "2");
    }
}
