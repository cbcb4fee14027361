use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

const ISO_DATE: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// `#[serde(with = "iso_date")]` for `YYYY-MM-DD` strings.
pub mod iso_date {
    use serde::{de, ser, Deserialize, Deserializer, Serializer};
    use time::Date;

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let formatted = date.format(super::ISO_DATE).map_err(ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_iso_date(&raw).map_err(de::Error::custom)
    }

    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer};
        use time::Date;

        pub fn serialize<S: Serializer>(
            date: &Option<Date>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => super::serialize(date, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Date>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| super::super::parse_iso_date(&raw).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}

pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Parses `YYYY-MM-DD`, also accepting a date-time whose date part comes first
/// (`2024-03-01T00:00:00+01:00`); the time and offset are dropped.
pub fn parse_iso_date(raw: &str) -> Result<Date, time::error::Parse> {
    let raw = raw.trim();
    let date_part = raw.split_once('T').map_or(raw, |(date, _)| date);
    Date::parse(date_part, ISO_DATE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn parses_plain_dates() {
        assert_eq!(parse_iso_date("2024-03-01").unwrap(), date!(2024 - 03 - 01));
        assert_eq!(parse_iso_date(" 2024-12-31 ").unwrap(), date!(2024 - 12 - 31));
    }

    #[test]
    fn drops_time_and_offset() {
        assert_eq!(
            parse_iso_date("2024-03-01T00:00:00+01:00").unwrap(),
            date!(2024 - 03 - 01)
        );
        assert_eq!(parse_iso_date("2024-03-01T23:59:59").unwrap(), date!(2024 - 03 - 01));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_iso_date("yesterday").is_err());
        assert!(parse_iso_date("2024-02-30").is_err());
        assert!(parse_iso_date("").is_err());
    }

    #[test]
    fn optional_iso_date_accepts_missing_and_null() {
        #[derive(serde::Deserialize)]
        struct Body {
            #[serde(default, with = "iso_date::option")]
            day: Option<Date>,
        }

        assert_eq!(serde_json::from_str::<Body>("{}").unwrap().day, None);
        assert_eq!(serde_json::from_str::<Body>(r#"{"day":null}"#).unwrap().day, None);
        assert_eq!(
            serde_json::from_str::<Body>(r#"{"day":"2024-02-29"}"#).unwrap().day,
            Some(date!(2024 - 02 - 29))
        );
    }

    #[test]
    fn iso_date_serde_uses_dashes() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Wrapper {
            #[serde(with = "iso_date")]
            day: Date,
        }

        let json = serde_json::to_string(&Wrapper { day: date!(2024 - 01 - 05) }).unwrap();
        assert_eq!(json, r#"{"day":"2024-01-05"}"#);
        let back: Wrapper = serde_json::from_str(&json).unwrap();
        assert_eq!(back.day, date!(2024 - 01 - 05));
    }
}
