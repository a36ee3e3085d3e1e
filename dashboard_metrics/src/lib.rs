pub mod debug;
pub mod decode;
pub mod fetch;
pub mod metric;
pub mod series;

/// Which chart the rendering component should draw for a panel.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    Doughnut,
}

impl ChartKind {
    /// The type string the charting component understands.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
            ChartKind::Doughnut => "doughnut",
        }
    }
}

/// How a metric's categorical field is turned into a chart label.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LabelStyle {
    /// Use the field value as-is, `"Unknown"` when missing.
    Plain,
    /// Format the field as a Spanish short date, `"Invalid Date"` when unparsable.
    Date,
    /// Truncate an `HH:MM[:SS]` value to the hour, `"Unknown"` when missing.
    Hour,
    /// Prefix the field value with `"Status "`.
    Status,
}
