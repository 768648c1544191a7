use bon::bon;
use serde::{Serialize, Serializer, ser::SerializeMap};
use serde_json::{Map, Value};

/// One brownfield site.
///
/// Flat fields come from the tabular source. The nested [`Properties`]
/// mapping carries free-form extra attributes and acts as a fallback for some
/// of the flat fields: accessors always consult the flat field first, then the
/// nested mapping.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Site {
  pub id: String,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub area_m2: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub function: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub current_use: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub ownership: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub has_heritage: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub has_pollution: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub environmental_burden: Option<String>,

  pub properties: Properties,
}

impl Site {
  /// Site area in square meters, `area_m2` or nested `area`.
  pub fn area(&self) -> Option<f64> {
    self.area_m2.or_else(|| self.properties.number("area"))
  }

  /// Land-use category, as written in the source.
  ///
  /// Looks up `function`, then `current_use`, then the nested `function`,
  /// and falls back to the empty category.
  pub fn land_use(&self) -> &str {
    present(self.function.as_deref())
      .or_else(|| present(self.current_use.as_deref()))
      .or_else(|| self.properties.text("function"))
      .unwrap_or_default()
  }

  pub fn ownership(&self) -> &str {
    present(self.ownership.as_deref()).or_else(|| self.properties.text("ownership")).unwrap_or_default()
  }

  pub fn heritage(&self) -> Option<bool> {
    self.has_heritage.or_else(|| self.properties.flag("has_heritage"))
  }

  pub fn pollution(&self) -> Option<bool> {
    self.has_pollution.or_else(|| self.properties.flag("has_pollution"))
  }

  pub fn environmental_burden(&self) -> Option<&str> {
    present(self.environmental_burden.as_deref())
  }
}

#[bon]
impl Site {
  #[builder]
  pub fn builder(
    #[builder(start_fn)] id: &str,
    area_m2: Option<f64>,
    function: Option<&str>,
    current_use: Option<&str>,
    ownership: Option<&str>,
    has_heritage: Option<bool>,
    has_pollution: Option<bool>,
    environmental_burden: Option<&str>,
    #[builder(default)] properties: &[(&str, Value)],
  ) -> Site {
    Site {
      id: id.to_string(),
      area_m2,
      function: function.map(ToOwned::to_owned),
      current_use: current_use.map(ToOwned::to_owned),
      ownership: ownership.map(ToOwned::to_owned),
      has_heritage,
      has_pollution,
      environmental_burden: environmental_burden.map(ToOwned::to_owned),
      properties: properties.iter().map(|(key, value)| (key.to_string(), value.clone())).collect(),
    }
  }
}

/// Free-form attributes attached to a site.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Properties(Map<String, Value>);

impl Properties {
  /// Decode a serialized attribute blob.
  ///
  /// Anything that is not a JSON object yields an empty mapping.
  pub fn parse(blob: &str) -> Properties {
    if blob.trim().is_empty() {
      return Properties::default();
    }

    match serde_json::from_str::<Value>(blob) {
      Ok(Value::Object(map)) => Properties(map),

      Ok(other) => {
        tracing::debug!(kind = value_kind(&other), "attribute blob is not an object, ignoring");

        Properties::default()
      }

      Err(err) => {
        tracing::debug!(error = %err, "could not decode attribute blob, ignoring");

        Properties::default()
      }
    }
  }

  pub fn get(&self, key: &str) -> Option<&Value> {
    self.0.get(key)
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Numeric value of `key`, accepting numbers and numeric strings.
  pub fn number(&self, key: &str) -> Option<f64> {
    match self.get(key)? {
      Value::Number(number) => number.as_f64(),
      Value::String(text) => text.trim().parse::<f64>().ok(),
      _ => None,
    }
  }

  /// Non-blank string value of `key`.
  pub fn text(&self, key: &str) -> Option<&str> {
    match self.get(key)? {
      Value::String(text) => present(Some(text.as_str())),
      _ => None,
    }
  }

  /// Boolean value of `key`, coerced from booleans, numbers or text.
  pub fn flag(&self, key: &str) -> Option<bool> {
    match self.get(key)? {
      Value::Bool(flag) => Some(*flag),
      Value::Number(number) => number.as_f64().map(|n| n != 0.0),
      Value::String(text) => coerce_bool(text),
      _ => None,
    }
  }
}

impl FromIterator<(String, Value)> for Properties {
  fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
    Properties(iter.into_iter().collect())
  }
}

/// Ranked similarity of one candidate against the reference site.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoreResult {
  pub id: String,
  pub similarity_score: f64,
  pub component_scores: ComponentScores,
}

/// Per-attribute similarity, in scoring order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComponentScores(pub(crate) Vec<(&'static str, f64)>);

impl ComponentScores {
  pub fn get(&self, attribute: &str) -> Option<f64> {
    self.0.iter().find(|(name, _)| *name == attribute).map(|(_, score)| *score)
  }

  pub fn iter(&self) -> impl Iterator<Item = &(&'static str, f64)> {
    self.0.iter()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl Serialize for ComponentScores {
  fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
    let mut map = ser.serialize_map(Some(self.0.len()))?;
    for (k, v) in &self.0 {
      map.serialize_entry(k, v)?;
    }
    map.end()
  }
}

/// Coerce a textual flag into a boolean.
///
/// Unrecognized or blank text is unknown rather than false.
pub(crate) fn coerce_bool(text: &str) -> Option<bool> {
  match text.trim().to_ascii_lowercase().as_str() {
    "true" | "t" | "yes" | "y" | "1" => Some(true),
    "false" | "f" | "no" | "n" | "0" => Some(false),
    other => other.parse::<f64>().ok().filter(|n| !n.is_nan()).map(|n| n != 0.0),
  }
}

/// Round to three decimals, ties to even.
pub(crate) fn round3(value: f64) -> f64 {
  (value * 1000.0).round_ties_even() / 1000.0
}

fn present(value: Option<&str>) -> Option<&str> {
  value.filter(|v| !v.trim().is_empty())
}

fn value_kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "bool",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use crate::model::{Properties, Site, coerce_bool, round3};

  #[test]
  fn flat_fields_take_precedence() {
    let site = Site::builder("bf_0")
      .area_m2(12_000.0)
      .ownership("Public")
      .has_heritage(false)
      .properties(&[("area", json!(500.0)), ("ownership", json!("private")), ("has_heritage", json!(true))])
      .build();

    assert_eq!(site.area(), Some(12_000.0));
    assert_eq!(site.ownership(), "Public");
    assert_eq!(site.heritage(), Some(false));
  }

  #[test]
  fn nested_fields_are_fallbacks() {
    let site = Site::builder("bf_1")
      .ownership("  ")
      .properties(&[("area", json!("8000")), ("ownership", json!("mixed")), ("has_pollution", json!(1)), ("function", json!("retail"))])
      .build();

    assert_eq!(site.area(), Some(8000.0));
    assert_eq!(site.ownership(), "mixed");
    assert_eq!(site.pollution(), Some(true));
    assert_eq!(site.heritage(), None);
    assert_eq!(site.land_use(), "retail");
  }

  #[test]
  fn land_use_chain() {
    let site = Site::builder("a").function("commercial").current_use("industrial").build();
    assert_eq!(site.land_use(), "commercial");

    let site = Site::builder("b").function("").current_use("industrial").properties(&[("function", json!("retail"))]).build();
    assert_eq!(site.land_use(), "industrial");

    let site = Site::builder("c").build();
    assert_eq!(site.land_use(), "");
  }

  #[test]
  fn blank_burden_is_absent() {
    assert_eq!(Site::builder("a").environmental_burden(" ").build().environmental_burden(), None);
    assert_eq!(Site::builder("a").environmental_burden("asbestos").build().environmental_burden(), Some("asbestos"));
  }

  #[test]
  fn parse_properties() {
    let props = Properties::parse(r#"{"building_density_fsi": 1.2, "function": "mixed_use"}"#);

    assert_eq!(props.len(), 2);
    assert_eq!(props.number("building_density_fsi"), Some(1.2));
    assert_eq!(props.text("function"), Some("mixed_use"));

    assert!(Properties::parse("").is_empty());
    assert!(Properties::parse("{not json").is_empty());
    assert!(Properties::parse("[1, 2]").is_empty());
    assert!(Properties::parse("null").is_empty());
  }

  #[test]
  fn boolean_coercion() {
    assert_eq!(coerce_bool("True"), Some(true));
    assert_eq!(coerce_bool(" no "), Some(false));
    assert_eq!(coerce_bool("1.0"), Some(true));
    assert_eq!(coerce_bool("0"), Some(false));
    assert_eq!(coerce_bool(""), None);
    assert_eq!(coerce_bool("maybe"), None);
  }

  #[test]
  fn rounding() {
    assert_eq!(round3(0.13533528), 0.135);
    assert_eq!(round3(1.0), 1.0);
    assert_eq!(round3(0.6666), 0.667);
    assert_eq!(round3(0.0625), 0.062);
    assert_eq!(round3(0.3125), 0.312);
    assert_eq!(round3(0.1875), 0.188);
  }
}
