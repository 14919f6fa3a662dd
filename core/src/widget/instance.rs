// Placed widget instances
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::definition::GridSize;

/// Widget settings: configuration key -> value
pub type Settings = Map<String, Value>;

/// Grid placement of a widget. `i` identifies the layout slot and is
/// independent of the widget's own id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WidgetLayout {
    pub i: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl WidgetLayout {
    pub fn new(i: impl Into<String>, x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            i: i.into(),
            x,
            y,
            w,
            h,
        }
    }

    pub fn size(&self) -> GridSize {
        GridSize::new(self.w, self.h)
    }

    /// First column past the right edge
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    /// First row past the bottom edge
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    pub fn overlaps(&self, other: &WidgetLayout) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// One concrete widget on a dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetInstance {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub title: String,

    pub layout: WidgetLayout,

    #[serde(default)]
    pub settings: Settings,

    pub date_added: DateTime<Utc>,

    pub date_updated: DateTime<Utc>,
}

impl WidgetInstance {
    pub fn setting(&self, key: &str) -> Option<&Value> {
        self.settings.get(key)
    }

    /// Compare everything except identity and timestamps
    pub fn same_content(&self, other: &WidgetInstance) -> bool {
        self.kind == other.kind
            && self.title == other.title
            && self.layout == other.layout
            && self.settings == other.settings
    }

    /// Compare content while ignoring layout ids, which are freshly generated
    pub fn same_content_ignoring_layout_id(&self, other: &WidgetInstance) -> bool {
        self.kind == other.kind
            && self.title == other.title
            && self.settings == other.settings
            && (self.layout.x, self.layout.y, self.layout.w, self.layout.h)
                == (other.layout.x, other.layout.y, other.layout.w, other.layout.h)
    }
}
