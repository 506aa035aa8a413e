use crate::domain::{is_all, Field, Record, ALL_AREAS};
use tracing::debug;

/// Rows whose `key_field` equals `key_value`, further restricted by `sub` unless its
/// value is the "ALL" sentinel. An empty result is a valid "no data" view.
pub fn filter_by<'a, R: Record>(
    rows: &'a [R],
    key_field: Field,
    key_value: &str,
    sub: Option<(Field, &str)>,
) -> Vec<&'a R> {
    let sub = sub.filter(|(_, value)| !is_all(value));

    let selected: Vec<&R> = rows
        .iter()
        .filter(|row| row.field(key_field) == Some(key_value))
        .filter(|row| sub.map_or(true, |(field, value)| row.field(field) == Some(value)))
        .collect();

    debug!(
        key = key_field.column(),
        value = key_value,
        matched = selected.len(),
        "filtered rows"
    );
    selected
}

/// Distinct non-blank values of a column in first-appearance order
pub fn distinct<'a, R: Record + 'a>(
    rows: impl IntoIterator<Item = &'a R>,
    field: Field,
) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for value in rows.into_iter().filter_map(|row| row.field(field)) {
        if !value.is_empty() && !values.iter().any(|known| known == value) {
            values.push(value.to_string());
        }
    }
    values
}

/// Area choices for a selection: the "ALL" sentinel followed by the areas present
pub fn area_options<R: Record>(rows: &[R], key_field: Field, key_value: &str) -> Vec<String> {
    let selected = filter_by(rows, key_field, key_value, None);
    let mut options = vec![ALL_AREAS.to_string()];
    options.extend(distinct(selected, Field::Area));
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::indicators::IndicatorRow;
    use crate::data::scores::read_scores;
    use crate::config::default_ports;

    fn indicator(category: &str, area: &str, metric: &str) -> IndicatorRow {
        IndicatorRow {
            category: category.to_string(),
            attribute: "Attr".to_string(),
            area: area.to_string(),
            metric: metric.to_string(),
        }
    }

    fn rows() -> Vec<IndicatorRow> {
        vec![
            indicator("SDG 1", "Social", "m1"),
            indicator("SDG 1", "Economic", "m2"),
            indicator("SDG 2", "Social", "m3"),
            indicator("SDG 1", "Social", "m4"),
        ]
    }

    fn metrics(rows: &[&IndicatorRow]) -> Vec<String> {
        rows.iter().map(|row| row.metric.clone()).collect()
    }

    #[test]
    fn all_sentinel_matches_key_alone() {
        let rows = rows();
        let all = filter_by(&rows, Field::Category, "SDG 1", Some((Field::Area, "ALL")));
        let keyed = filter_by(&rows, Field::Category, "SDG 1", None);

        assert_eq!(metrics(&all), vec!["m1", "m2", "m4"]);
        assert_eq!(all, keyed);
    }

    #[test]
    fn specific_sub_value_intersects() {
        let rows = rows();
        let social = filter_by(&rows, Field::Category, "SDG 1", Some((Field::Area, "Social")));
        assert_eq!(metrics(&social), vec!["m1", "m4"]);
    }

    #[test]
    fn no_match_is_empty_not_an_error() {
        let rows = rows();
        assert!(filter_by(&rows, Field::Category, "SDG 17", None).is_empty());
        assert!(filter_by(&rows, Field::Category, "SDG 2", Some((Field::Area, "Economic"))).is_empty());
    }

    #[test]
    fn area_options_start_with_all() {
        let rows = rows();
        assert_eq!(
            area_options(&rows, Field::Category, "SDG 1"),
            vec!["ALL", "Social", "Economic"]
        );
        assert_eq!(distinct(&rows, Field::Category), vec!["SDG 1", "SDG 2"]);
    }

    #[test]
    fn selecting_a_theme_with_all_areas_keeps_only_that_theme() -> Result<(), Box<dyn std::error::Error>> {
        let csv = "TEMA;AREA;ITEM_AJUST;Port A;Port B;Port C;Port D;Port E;Port F\n\
                   SDG 1;Social;1;1;1;1;1;1;1\n\
                   SDG 2;Social;1;2;2;2;2;2;2\n\
                   SDG 1;Environmental;2;3;3;3;3;3;3\n\
                   SDG 2;Economic;2;0;0;0;0;0;0\n";
        let table = read_scores(csv.as_bytes(), &default_ports())?;

        let view = filter_by(table.rows(), Field::Theme, "SDG 1", Some((Field::Area, "ALL")));
        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|row| row.theme == "SDG 1"));
        assert_eq!(distinct(view, Field::Area), vec!["Social", "Environmental"]);
        Ok(())
    }
}
