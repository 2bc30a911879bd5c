use std::sync::{Arc, Mutex};
use chrono::{NaiveDate, Utc};

pub const DATE_FMT: &str = "%Y-%m-%d";

pub mod serializer {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::{date_to_json, parse_date};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        date_to_json(*date).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let str_date: String = Deserialize::deserialize(deserializer)?;
        parse_date(&str_date).map_err(D::Error::custom)
    }
}

pub mod opt_serializer {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::{date_to_json, parse_date};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        date.map(date_to_json).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        let str_date: Option<String> = Deserialize::deserialize(deserializer)?;
        match str_date {
            Some(s) if !s.is_empty() => parse_date(&s).map(Some).map_err(D::Error::custom),
            _ => Ok(None),
        }
    }
}

fn date_to_json(d: NaiveDate) -> String {
    format!("{}", d.format(DATE_FMT))
}

pub(crate) fn parse_date(str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(str, DATE_FMT)
}

// Clock supplies the calendar date that loans and fines are computed against
pub trait Clock: Sync + Send {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

#[derive(Debug, Clone)]
pub struct FixedClock {
    today: Arc<Mutex<NaiveDate>>,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Arc::new(Mutex::new(today)),
        }
    }

    // moves the clock; clones share the same date
    pub fn set(&self, today: NaiveDate) {
        if let Ok(mut guard) = self.today.lock() {
            *guard = today;
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        match self.today.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde::{Deserialize, Serialize};
    use crate::utils::date::{Clock, FixedClock, opt_serializer, serializer};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Dated {
        #[serde(with = "serializer")]
        on: NaiveDate,
        #[serde(with = "opt_serializer", default)]
        until: Option<NaiveDate>,
    }

    #[tokio::test]
    async fn test_should_serialize_calendar_dates() {
        let dated = Dated { on: NaiveDate::from_ymd_opt(2024, 3, 9).expect("date"), until: None };
        let json = serde_json::to_string(&dated).expect("should serialize");
        assert_eq!(r#"{"on":"2024-03-09","until":null}"#, json);
    }

    #[tokio::test]
    async fn test_should_deserialize_missing_and_empty_optional_dates() {
        let dated: Dated = serde_json::from_str(r#"{"on":"2024-03-09"}"#).expect("should parse");
        assert_eq!(None, dated.until);
        let dated: Dated = serde_json::from_str(r#"{"on":"2024-03-09","until":""}"#).expect("should parse");
        assert_eq!(None, dated.until);
        let dated: Dated = serde_json::from_str(r#"{"on":"2024-03-09","until":"2024-03-23"}"#).expect("should parse");
        assert_eq!(NaiveDate::from_ymd_opt(2024, 3, 23), dated.until);
    }

    #[tokio::test]
    async fn test_should_reject_malformed_dates() {
        assert!(serde_json::from_str::<Dated>(r#"{"on":"09/03/2024"}"#).is_err());
    }

    #[tokio::test]
    async fn test_should_move_fixed_clock() {
        let day0 = NaiveDate::from_ymd_opt(2024, 1, 1).expect("date");
        let clock = FixedClock::new(day0);
        let shared = clock.clone();
        assert_eq!(day0, shared.today());
        let day1 = day0.succ_opt().expect("date");
        clock.set(day1);
        assert_eq!(day1, shared.today());
    }
}
