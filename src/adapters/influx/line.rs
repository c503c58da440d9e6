use crate::domain::model::FieldValue;

/// Encode one point in InfluxDB 1.x line protocol:
/// `measurement,tag=value field=value[,field=value...] [timestamp]`.
///
/// Tags with empty values are dropped (the server rejects them). When
/// `timestamp_ns` is `None` the server assigns the write time.
pub fn encode_point(
    measurement: &str,
    tags: &[(&str, &str)],
    fields: &[(String, FieldValue)],
    timestamp_ns: Option<i64>,
) -> String {
    let mut line = escape_measurement(measurement);

    for (key, value) in tags {
        if value.is_empty() {
            continue;
        }
        line.push(',');
        line.push_str(&escape_key(key));
        line.push('=');
        line.push_str(&escape_key(value));
    }

    line.push(' ');
    let rendered: Vec<String> = fields
        .iter()
        .map(|(name, value)| format!("{}={}", escape_key(name), render_value(value)))
        .collect();
    line.push_str(&rendered.join(","));

    if let Some(ts) = timestamp_ns {
        line.push(' ');
        line.push_str(&ts.to_string());
    }

    line
}

fn render_value(value: &FieldValue) -> String {
    match value {
        // the `i` suffix marks integer fields; bare numbers are floats
        FieldValue::Integer(v) => format!("{}i", v),
        FieldValue::Float(v) => format!("{}", v),
    }
}

fn escape_measurement(s: &str) -> String {
    s.replace(',', "\\,").replace(' ', "\\ ")
}

fn escape_key(s: &str) -> String {
    s.replace(',', "\\,").replace('=', "\\=").replace(' ', "\\ ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_simple_point() {
        let fields = vec![
            ("memory_total".to_string(), FieldValue::Integer(1024)),
            ("cpu_percent".to_string(), FieldValue::Float(12.5)),
        ];

        let line = encode_point("sysmon", &[("hostname", "node-1")], &fields, None);

        assert_eq!(line, "sysmon,hostname=node-1 memory_total=1024i,cpu_percent=12.5");
    }

    #[test]
    fn test_encode_with_timestamp() {
        let fields = vec![("memory_used".to_string(), FieldValue::Integer(7))];

        let line = encode_point("sysmon", &[], &fields, Some(1_700_000_000_000_000_000));

        assert_eq!(line, "sysmon memory_used=7i 1700000000000000000");
    }

    #[test]
    fn test_whole_floats_stay_unsuffixed() {
        let fields = vec![("disk_usage_/_percent".to_string(), FieldValue::Float(40.0))];

        let line = encode_point("sysmon", &[], &fields, None);

        assert_eq!(line, "sysmon disk_usage_/_percent=40");
    }

    #[test]
    fn test_escaping_in_tags_and_field_keys() {
        let fields = vec![("disk usage,a=b".to_string(), FieldValue::Integer(1))];

        let line = encode_point("my measurement", &[("host name", "my host")], &fields, None);

        assert_eq!(
            line,
            "my\\ measurement,host\\ name=my\\ host disk\\ usage\\,a\\=b=1i"
        );
    }

    #[test]
    fn test_empty_tag_values_are_dropped() {
        let fields = vec![("memory_total".to_string(), FieldValue::Integer(1))];

        let line = encode_point("sysmon", &[("hostname", "")], &fields, None);

        assert_eq!(line, "sysmon memory_total=1i");
    }

    #[test]
    fn test_negative_values() {
        let fields = vec![
            ("delta".to_string(), FieldValue::Integer(-3)),
            ("temp".to_string(), FieldValue::Float(-0.5)),
        ];

        let line = encode_point("sysmon", &[], &fields, None);

        assert_eq!(line, "sysmon delta=-3i,temp=-0.5");
    }
}
