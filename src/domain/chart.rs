// Chart domain models
use serde::Serialize;

/// Index-aligned bar chart input: `labels[i]` belongs to `values[i]`.
///
/// A `None` value keeps its label and is drawn as a gap.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartData {
    labels: Vec<String>,
    values: Vec<Option<f64>>,
}

impl ChartData {
    pub fn from_pairs<I, L, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (L, V)>,
        L: Into<String>,
        V: Into<Option<f64>>,
    {
        let (labels, values) = pairs
            .into_iter()
            .map(|(label, value)| (label.into(), value.into()))
            .unzip();
        Self { labels, values }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    Bar,
}

/// How magnitudes are rendered on ticks and tooltips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueFormat {
    Count,
    Usd,
}

impl ValueFormat {
    pub fn format(&self, value: f64) -> String {
        match self {
            ValueFormat::Count => {
                if value.fract() == 0.0 {
                    format!("{}", value as i64)
                } else {
                    value.to_string()
                }
            }
            ValueFormat::Usd => format_usd(value),
        }
    }
}

/// "$1,234.50" style, always two fraction digits.
fn format_usd(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, fraction)
}

/// Everything the charting collaborator needs besides the data itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub dataset_label: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub begin_at_zero: bool,
    pub background_color: String,
    pub border_color: String,
    pub value_format: ValueFormat,
}

/// A live chart instance. Not `Clone`: exactly one owner, released through
/// `ChartRenderer::destroy`.
#[derive(Debug, PartialEq, Eq)]
pub struct ChartHandle {
    id: u64,
    surface: String,
}

impl ChartHandle {
    pub fn new(id: u64, surface: String) -> Self {
        Self { id, surface }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn surface(&self) -> &str {
        &self.surface
    }
}
