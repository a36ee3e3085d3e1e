use crate::{ChartKind, LabelStyle};

/// One dashboard panel's metric, as exposed by the stats API.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Metric {
    TotalVisits,
    VisitsByDay,
    VisitsByCountry,
    VisitsByParameter,
    VisitsByHour,
    VisitsByDevice,
    VisitsByStatus,
}

/// How a chart metric's records are shaped into a series.
#[derive(Copy, Clone, Debug)]
pub struct SeriesShape {
    pub kind: ChartKind,
    pub label_field: &'static str,
    pub label_style: LabelStyle,
    pub value_field: &'static str,
}

impl Metric {
    pub const ALL: [Metric; 7] = [
        Metric::TotalVisits,
        Metric::VisitsByDay,
        Metric::VisitsByCountry,
        Metric::VisitsByParameter,
        Metric::VisitsByHour,
        Metric::VisitsByDevice,
        Metric::VisitsByStatus,
    ];

    /// Endpoint path under the API base url.
    pub fn path(&self) -> &'static str {
        match self {
            Metric::TotalVisits => "total_visitas",
            Metric::VisitsByDay => "visitas_por_dia",
            Metric::VisitsByCountry => "visitas_por_pais",
            Metric::VisitsByParameter => "visitas_por_parametro",
            Metric::VisitsByHour => "visitas_por_hora",
            Metric::VisitsByDevice => "visitas_por_dispositivo",
            Metric::VisitsByStatus => "visitas_por_estado",
        }
    }

    /// The id of the page element this panel owns exclusively.
    /// No two panels share an element.
    pub fn panel_id(&self) -> &'static str {
        match self {
            Metric::TotalVisits => "total-visits-count",
            Metric::VisitsByDay => "visits-by-day-chart",
            Metric::VisitsByCountry => "visits-by-country-chart",
            Metric::VisitsByParameter => "visits-by-parameter-chart",
            Metric::VisitsByHour => "visits-by-hour-chart",
            Metric::VisitsByDevice => "visits-by-device-chart",
            Metric::VisitsByStatus => "visits-by-status-chart",
        }
    }

    /// `None` for the scalar total panel, which renders a number instead
    /// of a chart.
    pub fn series_shape(&self) -> Option<SeriesShape> {
        let shape = match self {
            Metric::TotalVisits => return None,
            Metric::VisitsByDay => SeriesShape {
                kind: ChartKind::Line,
                label_field: "dia",
                label_style: LabelStyle::Date,
                value_field: "visitas",
            },
            Metric::VisitsByCountry => SeriesShape {
                kind: ChartKind::Bar,
                label_field: "pais",
                label_style: LabelStyle::Plain,
                value_field: "visitas",
            },
            Metric::VisitsByParameter => SeriesShape {
                kind: ChartKind::Pie,
                label_field: "parametro",
                label_style: LabelStyle::Plain,
                value_field: "visitas",
            },
            Metric::VisitsByHour => SeriesShape {
                kind: ChartKind::Line,
                label_field: "hora",
                label_style: LabelStyle::Hour,
                value_field: "visitas",
            },
            Metric::VisitsByDevice => SeriesShape {
                kind: ChartKind::Doughnut,
                label_field: "dispositivo",
                label_style: LabelStyle::Plain,
                value_field: "visitas",
            },
            Metric::VisitsByStatus => SeriesShape {
                kind: ChartKind::Bar,
                label_field: "estado",
                label_style: LabelStyle::Status,
                value_field: "cantidad",
            },
        };
        Some(shape)
    }

    /// The fixed, non-technical text a panel shows when it fails to load.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Metric::TotalVisits => "Error loading data",
            Metric::VisitsByStatus => "Service temporarily unavailable",
            _ => "Datos temporalmente no disponibles",
        }
    }
}
