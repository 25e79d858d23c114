// ABOUTME: This module handles output formatting for the Imgur CLI
// ABOUTME: It renders resources and quota snapshots as colored tables or JSON

use anyhow::Result;
use chrono::{DateTime, Utc};
use imgur_sdk::{QuotaSnapshot, Resource};
use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::constants::ui;

pub trait OutputFormat {
    fn format_resource(&self, resource: &Resource) -> Result<String>;
    fn format_quota(&self, quota: &QuotaSnapshot) -> Result<String>;
}

pub struct TableFormatter {
    use_color: bool,
}

impl TableFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn truncate(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            text.to_string()
        } else {
            let kept: String = text.chars().take(max_chars - 3).collect();
            format!("{kept}...")
        }
    }

    fn missing(&self) -> String {
        if self.use_color {
            ui::MISSING.dimmed().to_string()
        } else {
            ui::MISSING.to_string()
        }
    }

    fn text(&self, value: Option<&str>) -> String {
        match value.filter(|v| !v.is_empty()) {
            Some(value) => Self::truncate(value, ui::MAX_TEXT_WIDTH),
            None => self.missing(),
        }
    }

    fn time(&self, value: Option<DateTime<Utc>>) -> String {
        match value {
            Some(time) => time.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            None => self.missing(),
        }
    }

    fn kind_label(&self, resource: &Resource) -> String {
        let label = resource.kind().to_string();
        if self.use_color {
            label.cyan().bold().to_string()
        } else {
            label
        }
    }

    fn remaining(&self, remaining: i64, limit: i64) -> String {
        let text = remaining.to_string();
        if !self.use_color || limit <= 0 {
            return text;
        }
        if remaining <= 0 {
            text.red().bold().to_string()
        } else if (remaining as f64) < (limit as f64) * ui::LOW_QUOTA_RATIO {
            text.yellow().to_string()
        } else {
            text.green().to_string()
        }
    }

    fn resource_rows(&self, resource: &Resource) -> Vec<FieldRow> {
        let mut rows = vec![
            FieldRow::new("Kind", self.kind_label(resource)),
            FieldRow::new("ID", resource.id().to_string()),
            FieldRow::new("Title", self.text(resource.title())),
        ];

        match resource {
            Resource::Image(image) => {
                let description = self.text(image.description.as_deref());
                rows.push(FieldRow::new("Description", description));
                rows.push(FieldRow::new("Type", self.text(Some(&image.mime_type))));
                rows.push(FieldRow::new("Size", dimensions(image.width, image.height, image.size)));
                rows.push(FieldRow::new("Views", image.views.to_string()));
                rows.push(FieldRow::new("Uploaded", self.time(image.uploaded_at())));
            }
            Resource::GalleryImage(image) => {
                let description = self.text(image.description.as_deref());
                rows.push(FieldRow::new("Description", description));
                rows.push(FieldRow::new("Type", self.text(Some(&image.mime_type))));
                rows.push(FieldRow::new("Size", dimensions(image.width, image.height, image.size)));
                rows.push(FieldRow::new("Views", image.views.to_string()));
                rows.push(FieldRow::new("Points", votes(image.points, image.ups, image.downs)));
                rows.push(FieldRow::new("Uploaded", self.time(image.uploaded_at())));
            }
            Resource::Album(album) => {
                let description = self.text(album.description.as_deref());
                rows.push(FieldRow::new("Description", description));
                rows.push(FieldRow::new("Images", album.images_count.to_string()));
                rows.push(FieldRow::new("Views", album.views.to_string()));
                rows.push(FieldRow::new("Created", self.time(album.created_at())));
            }
            Resource::GalleryAlbum(album) => {
                let description = self.text(album.description.as_deref());
                rows.push(FieldRow::new("Description", description));
                rows.push(FieldRow::new("Images", album.images_count.to_string()));
                rows.push(FieldRow::new("Views", album.views.to_string()));
                rows.push(FieldRow::new("Points", votes(album.points, album.ups, album.downs)));
                rows.push(FieldRow::new("Topic", self.text(album.topic.as_deref())));
                rows.push(FieldRow::new("Created", self.time(album.created_at())));
            }
        }

        rows.push(FieldRow::new("Link", resource.link().to_string()));
        rows
    }
}

fn dimensions(width: u32, height: u32, size: u64) -> String {
    format!("{width}x{height}, {size} bytes")
}

fn votes(points: i64, ups: i64, downs: i64) -> String {
    format!("{points} ({ups} up, {downs} down)")
}

pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn render<T: serde::Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormat for JsonFormatter {
    fn format_resource(&self, resource: &Resource) -> Result<String> {
        self.render(resource)
    }

    fn format_quota(&self, quota: &QuotaSnapshot) -> Result<String> {
        self.render(quota)
    }
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

impl FieldRow {
    fn new(field: &'static str, value: String) -> Self {
        Self { field, value }
    }
}

#[derive(Tabled)]
struct QuotaRow {
    #[tabled(rename = "Scope")]
    scope: &'static str,
    #[tabled(rename = "Limit")]
    limit: i64,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Resets")]
    reset: String,
}

impl OutputFormat for TableFormatter {
    fn format_resource(&self, resource: &Resource) -> Result<String> {
        let mut table = Table::new(self.resource_rows(resource));
        table.with(Style::psql());
        Ok(table.to_string())
    }

    fn format_quota(&self, quota: &QuotaSnapshot) -> Result<String> {
        let rows = vec![
            QuotaRow {
                scope: "User",
                limit: quota.user_limit,
                remaining: self.remaining(quota.user_remaining, quota.user_limit),
                reset: self.time(quota.user_reset),
            },
            QuotaRow {
                scope: "Client",
                limit: quota.client_limit,
                remaining: self.remaining(quota.client_remaining, quota.client_limit),
                reset: self.missing(),
            },
        ];

        let mut table = Table::new(rows);
        table.with(Style::psql());
        Ok(table.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgur_sdk::{AlbumInfo, GalleryImageInfo, ImageInfo};

    fn test_image() -> ImageInfo {
        ImageInfo {
            id: "abc123".to_string(),
            title: Some("Sunset".to_string()),
            datetime: 1_700_000_000,
            mime_type: "image/png".to_string(),
            width: 640,
            height: 480,
            size: 12345,
            views: 10,
            link: "https://i.imgur.com/abc123.png".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_image_table_without_color() {
        let formatter = TableFormatter::new(false);
        let result = formatter
            .format_resource(&Resource::Image(test_image()))
            .unwrap();

        assert!(result.contains("Field"));
        assert!(result.contains("abc123"));
        assert!(result.contains("Sunset"));
        assert!(result.contains("640x480, 12345 bytes"));
        assert!(result.contains("2023-11-14 22:13:20 UTC"));
        assert!(result.contains("https://i.imgur.com/abc123.png"));
        assert!(!result.contains("\u{1b}["));
    }

    #[test]
    fn test_missing_values_use_placeholder() {
        let formatter = TableFormatter::new(false);
        let album = AlbumInfo {
            id: "alb1".to_string(),
            images_count: 3,
            ..Default::default()
        };

        let result = formatter.format_resource(&Resource::Album(album)).unwrap();

        assert!(result.contains("album"));
        assert!(result.contains(" - "));
        assert!(result.contains("Images"));
    }

    #[test]
    fn test_long_titles_are_truncated() {
        let formatter = TableFormatter::new(false);
        let image = GalleryImageInfo {
            id: "g1".to_string(),
            title: Some("ü".repeat(100)),
            points: 5,
            ..Default::default()
        };

        let result = formatter
            .format_resource(&Resource::GalleryImage(image))
            .unwrap();

        assert!(result.contains(&format!("{}...", "ü".repeat(ui::MAX_TEXT_WIDTH - 3))));
        assert!(result.contains("5 (0 up, 0 down)"));
    }

    #[test]
    fn test_colored_table_highlights_kind() {
        let formatter = TableFormatter::new(true);
        let result = formatter
            .format_resource(&Resource::Image(test_image()))
            .unwrap();
        assert!(result.contains("\u{1b}["));
    }

    #[test]
    fn test_quota_table() {
        let formatter = TableFormatter::new(false);
        let quota = QuotaSnapshot {
            user_limit: 2000,
            user_remaining: 1999,
            user_reset: DateTime::<Utc>::from_timestamp(1_700_003_600, 0),
            client_limit: 12500,
            client_remaining: 12499,
        };

        let result = formatter.format_quota(&quota).unwrap();

        assert!(result.contains("User"));
        assert!(result.contains("1999"));
        assert!(result.contains("Client"));
        assert!(result.contains("12499"));
        assert!(result.contains("2023-11-14 23:13:20 UTC"));
    }

    #[test]
    fn test_quota_remaining_colors() {
        let formatter = TableFormatter::new(true);
        assert_eq!(formatter.remaining(5, 0), "5");
        assert_ne!(formatter.remaining(0, 100), "0");
        assert!(formatter.remaining(0, 100).contains('0'));
    }

    #[test]
    fn test_json_resource_is_tagged() {
        let formatter = JsonFormatter::new(false);
        let result = formatter
            .format_resource(&Resource::Image(test_image()))
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(value["kind"], "image");
        assert_eq!(value["id"], "abc123");
        assert_eq!(value["type"], "image/png");
        assert!(!result.contains('\n'));
    }

    #[test]
    fn test_json_pretty_quota() {
        let formatter = JsonFormatter::new(true);
        let result = formatter.format_quota(&QuotaSnapshot::default()).unwrap();

        assert!(result.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(value["user_limit"], 0);
        assert!(value["user_reset"].is_null());
    }
}
