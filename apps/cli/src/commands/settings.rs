//! # Settings Commands
//!
//! Shop name, logo, background color and the four rates.
//!
//! ## Rates
//! Margin, installation, IVA and IIBB are stored exactly as typed and
//! re-read on every calculation. A value that is not a number (`"21,5"`,
//! `"21%"`) is accepted and counts as `0`; `settings set` warns about it so
//! the operator notices before quoting.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;
use tracing::{debug, warn};

use super::Output;
use crate::cli::SettingKey;
use crate::error::{AppError, AppResult};
use crate::state::Session;
use glazier_core::numeric::coerce_number;
use glazier_core::validation::{logo_mime_for_extension, validate_hex_color, validate_shop_name};
use glazier_core::{Percent, ShopSettings};

/// Largest logo accepted, in bytes.
pub const MAX_LOGO_BYTES: usize = 2 * 1024 * 1024;

/// Settings with the rates as they will be applied.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SettingsView<'a> {
    #[serde(flatten)]
    settings: &'a ShopSettings,
    effective_margin: f64,
    effective_installation: f64,
    effective_vat: f64,
    effective_gross_receipts: f64,
}

impl<'a> From<&'a ShopSettings> for SettingsView<'a> {
    fn from(settings: &'a ShopSettings) -> Self {
        SettingsView {
            settings,
            effective_margin: Percent::parse(&settings.margin).value(),
            effective_installation: Percent::parse(&settings.installation).value(),
            effective_vat: Percent::parse(&settings.vat).value(),
            effective_gross_receipts: Percent::parse(&settings.gross_receipts).value(),
        }
    }
}

/// Shows the current settings.
pub fn show(session: &Session, output: Output) -> AppResult<String> {
    let settings = &session.settings;
    let view = SettingsView::from(settings);

    output.render(&view, || {
        let logo = match &settings.logo {
            Some(uri) => format!("set ({} bytes)", uri.len()),
            None => "none".to_string(),
        };

        [
            format!("Shop name:        {}", settings.shop_name),
            format!("Logo:             {}", logo),
            format!("Background color: {}", settings.background_color),
            rate_line("Margin", &settings.margin, view.effective_margin),
            rate_line("Installation", &settings.installation, view.effective_installation),
            rate_line("IVA", &settings.vat, view.effective_vat),
            rate_line("IIBB", &settings.gross_receipts, view.effective_gross_receipts),
        ]
        .join("\n")
    })
}

fn rate_line(label: &str, raw: &str, effective: f64) -> String {
    let label = format!("{}:", label);
    if coerce_number(raw).is_some() {
        format!("{:<17} {}%", label, effective)
    } else {
        format!("{:<17} {}% (\"{}\" is not a number)", label, effective, raw)
    }
}

/// Changes one setting and saves.
pub async fn set(session: &mut Session, key: SettingKey, value: &str) -> AppResult<String> {
    debug!(?key, value, "settings set command");

    let settings = &mut session.settings;
    let value = value.trim();
    match key {
        SettingKey::ShopName => {
            validate_shop_name(value)?;
            settings.shop_name = value.to_string();
        }
        SettingKey::BackgroundColor => {
            validate_hex_color(value)?;
            settings.background_color = value.to_string();
        }
        SettingKey::Margin => settings.margin = rate(key, value),
        SettingKey::Installation => settings.installation = rate(key, value),
        SettingKey::Vat => settings.vat = rate(key, value),
        SettingKey::GrossReceipts => settings.gross_receipts = rate(key, value),
    }

    session.save_settings().await?;
    Ok(format!("Saved {}", key_name(key)))
}

fn rate(key: SettingKey, value: &str) -> String {
    if coerce_number(value).is_none() {
        warn!(key = key_name(key), value, "Rate is not a number and will count as 0");
    }
    value.to_string()
}

fn key_name(key: SettingKey) -> &'static str {
    match key {
        SettingKey::ShopName => "shop-name",
        SettingKey::Margin => "margin",
        SettingKey::Installation => "installation",
        SettingKey::Vat => "vat",
        SettingKey::GrossReceipts => "gross-receipts",
        SettingKey::BackgroundColor => "background-color",
    }
}

/// Stores `image` as the shop logo (`data:<mime>;base64,<data>`).
pub async fn logo(session: &mut Session, image: &Path) -> AppResult<String> {
    let extension = image.extension().and_then(|e| e.to_str()).unwrap_or("");
    let mime = logo_mime_for_extension(extension)?;

    if std::fs::metadata(image)?.len() > MAX_LOGO_BYTES as u64 {
        return Err(AppError::validation(format!(
            "logo must be at most {} bytes",
            MAX_LOGO_BYTES
        )));
    }
    let bytes = std::fs::read(image)?;

    session.settings.logo = Some(data_uri(mime, &bytes));
    session.save_settings().await?;

    Ok(format!("Logo saved ({}, {} bytes)", mime, bytes.len()))
}

fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Restores default settings.
pub async fn reset(session: &mut Session) -> AppResult<String> {
    session.reset_settings().await?;
    Ok("Settings restored to defaults".to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
