//! Null-tolerant field decoding.
//!
//! The statistics API passes Jellyfin's nulls through untouched. A `null`
//! in a required field decodes to the field's default so one sparse session
//! cannot fail the whole list.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, Visitor};

/// `deserialize_with` adapter: `null` becomes `T::default()`.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Playback ticks from any JSON number; `null` is zero.
pub fn ticks<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserializer.deserialize_any(NumberVisitor)?.unwrap_or(0))
}

/// Bitrate in bits per second from any JSON number. Negative, non-finite and
/// non-numeric values read as not reported.
pub fn bitrate<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = deserializer.deserialize_any(NumberVisitor)?;
    Ok(raw.and_then(|bps| u64::try_from(bps).ok()))
}

struct NumberVisitor;

impl<'de> Visitor<'de> for NumberVisitor {
    type Value = Option<i64>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an optional number")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(i64::try_from(v).unwrap_or(i64::MAX)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        // `as` saturates at the i64 bounds.
        Ok(v.is_finite().then(|| v.round() as i64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(v.trim().parse().ok())
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Item, Session, TranscodingInfo};

    #[test]
    fn nulls_in_required_fields_take_defaults() {
        let session: Session = serde_json::from_str(
            r#"{
                "session_key": "a",
                "position_ticks": null,
                "formatted_position": null,
                "formatted_runtime": null,
                "progress_percent": null,
                "is_paused": null,
                "device_name": null,
                "client": null,
                "item": null
            }"#,
        )
        .unwrap();
        assert_eq!(session.session_key.as_str(), "a");
        assert_eq!(session.position_ticks, 0);
        assert_eq!(session.device_name, "");
        assert_eq!(session.progress_percent, 0.0);
        assert!(!session.is_paused);
        assert_eq!(session.item, Item::default());
    }

    #[test]
    fn numbers_decode_from_any_representation() {
        let info: TranscodingInfo =
            serde_json::from_str(r#"{"is_video_direct": null, "bitrate": 8000000.0}"#)
                .unwrap();
        assert_eq!(info.bitrate, Some(8_000_000));
        assert!(!info.is_video_direct);

        let negative: TranscodingInfo =
            serde_json::from_str(r#"{"bitrate": -1}"#).unwrap();
        assert_eq!(negative.bitrate, None);

        let ticks: Session =
            serde_json::from_str(r#"{"session_key": "t", "position_ticks": 1.5e9}"#)
                .unwrap();
        assert_eq!(ticks.position_ticks, 1_500_000_000);
    }

    #[test]
    fn one_sparse_session_keeps_the_list() {
        let sessions: Vec<Session> = serde_json::from_str(
            r#"[
                {"session_key": "a", "device_name": null, "item": {"name": null}},
                {"session_key": "b", "device_name": "Shield"}
            ]"#,
        )
        .unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].item.name, "");
        assert_eq!(sessions[1].device_name, "Shield");
    }
}
