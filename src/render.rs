use crate::lifespan;
use crate::types::ExtractedRecord;

/// Renders one subject's markdown block: heading, lifespan line, lead
/// paragraph, blank separator. Returns `None` when either derived date is
/// missing or the lifespan cannot be computed; a partial block would be
/// worse than none.
pub fn render_block(name: &str, record: &ExtractedRecord) -> Option<String> {
    let (Some(birth), Some(death)) = (record.birth_date(), record.death_date()) else {
        log::warn!("Skipping {}: missing extracted birth or death date", name);
        return None;
    };

    let span = match lifespan::age_at_death(birth, death) {
        Ok(span) => span,
        Err(e) => {
            log::warn!("Skipping {}: {}", name, e);
            return None;
        }
    };

    Some(format!(
        "### {}\nLived for {}\n{}\n\n",
        name, span, record.first_paragraph
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BIRTH_DATE_KEY, DEATH_DATE_KEY, FactMapping, FactValue};

    fn record_with_dates(birth: Option<&str>, death: Option<&str>) -> ExtractedRecord {
        let mut infobox = FactMapping::new();
        if let Some(date) = birth {
            infobox.insert(
                BIRTH_DATE_KEY.to_string(),
                FactValue::Text(date.to_string()),
            );
        }
        if let Some(date) = death {
            infobox.insert(
                DEATH_DATE_KEY.to_string(),
                FactValue::Text(date.to_string()),
            );
        }
        ExtractedRecord {
            first_paragraph: "Marie Curie was a physicist and chemist.".to_string(),
            infobox,
        }
    }

    #[test]
    fn test_render_full_record() {
        let record = record_with_dates(Some("1867-11-07"), Some("1934-07-04"));
        let block = render_block("Marie Curie", &record).expect("Should render a block");

        assert_eq!(
            block,
            "### Marie Curie\nLived for 66 years and 239 days\nMarie Curie was a physicist and chemist.\n\n"
        );
    }

    #[test]
    fn test_missing_death_date_renders_nothing() {
        let record = record_with_dates(Some("1867-11-07"), None);
        assert!(render_block("Marie Curie", &record).is_none());
    }

    #[test]
    fn test_missing_both_dates_renders_nothing() {
        let record = record_with_dates(None, None);
        assert!(render_block("Babadook", &record).is_none());
    }

    #[test]
    fn test_unavailable_lifespan_renders_nothing() {
        let record = record_with_dates(Some("1934-07-04"), Some("1867-11-07"));
        assert!(render_block("Marie Curie", &record).is_none());
    }
}
