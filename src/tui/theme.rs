//! Colors for the editor, in a dark and a light palette.
//!
//! Besides the usual chrome colors every device kind gets its own color so
//! breakers, residual-current devices and auxiliaries can be told apart on
//! the rail at a glance.

use ratatui::style::Color;

use crate::config::ThemeMode;
use crate::models::DeviceKind;

/// Semantic color theme for the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // Chrome
    /// Titles and emphasis
    pub primary: Color,
    /// Highlights, key labels, cursor markers
    pub accent: Color,
    /// Fitting enclosure, confirmations
    pub success: Color,
    /// Error overlay, oversized enclosure
    pub error: Color,
    /// Prompts and capacity warnings
    pub warning: Color,

    // Text
    /// Body text
    pub text: Color,
    /// Slot ranges and secondary labels
    pub text_secondary: Color,
    /// Hints, borders of the rail, ratings
    pub text_muted: Color,

    // Backgrounds
    /// Screen background
    pub background: Color,
    /// Cursor row background
    pub highlight_bg: Color,
    /// Cursor row background in an unfocused pane
    pub surface: Color,

    // Pane focus
    /// Border of the focused pane
    pub active: Color,
    /// Border of the other panes
    pub inactive: Color,

    // Device kinds
    /// Circuit breakers
    pub breaker: Color,
    /// Residual-current devices
    pub rcd: Color,
    /// Combination breakers
    pub rcbo: Color,
    /// Voltage relays
    pub relay: Color,
    /// Contactors
    pub contactor: Color,
    /// Energy meters
    pub meter: Color,
}

impl Theme {
    /// Picks the palette matching the OS appearance.
    ///
    /// Uses `dark-light`; an unknown or failed detection gives the dark palette.
    ///
    /// ```
    /// use electropanel::tui::theme::Theme;
    ///
    /// let theme = Theme::detect();
    /// assert!(theme == Theme::dark() || theme == Theme::light());
    /// ```
    #[must_use]
    pub fn detect() -> Self {
        match dark_light::detect() {
            Ok(dark_light::Mode::Light) => Self::light(),
            Ok(dark_light::Mode::Dark | dark_light::Mode::Unspecified) | Err(_) => Self::dark(),
        }
    }

    /// Palette for dark terminals.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            accent: Color::Yellow,
            success: Color::Green,
            error: Color::Red,
            warning: Color::LightYellow,

            text: Color::White,
            text_secondary: Color::Gray,
            text_muted: Color::DarkGray,

            background: Color::Black,
            highlight_bg: Color::Rgb(48, 54, 61),
            surface: Color::Rgb(28, 30, 34),

            active: Color::Yellow,
            inactive: Color::Gray,

            breaker: Color::Rgb(96, 165, 250),
            rcd: Color::Rgb(74, 222, 128),
            rcbo: Color::Rgb(45, 212, 191),
            relay: Color::Rgb(250, 204, 21),
            contactor: Color::Rgb(192, 132, 252),
            meter: Color::Rgb(251, 146, 60),
        }
    }

    /// Palette for light terminals. Device colors are darker shades of the
    /// dark palette so they stay readable on white.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::Blue,
            accent: Color::Rgb(180, 100, 0),
            success: Color::Rgb(0, 128, 0),
            error: Color::Red,
            warning: Color::Rgb(200, 100, 0),

            text: Color::Black,
            text_secondary: Color::Rgb(60, 60, 60),
            text_muted: Color::Gray,

            background: Color::White,
            highlight_bg: Color::Rgb(225, 230, 236),
            surface: Color::Rgb(245, 245, 245),

            active: Color::Rgb(180, 100, 0),
            inactive: Color::Rgb(180, 180, 180),

            breaker: Color::Rgb(29, 78, 216),
            rcd: Color::Rgb(21, 128, 61),
            rcbo: Color::Rgb(15, 118, 110),
            relay: Color::Rgb(161, 98, 7),
            contactor: Color::Rgb(126, 34, 206),
            meter: Color::Rgb(194, 65, 12),
        }
    }

    /// Resolves the configured mode; `Auto` asks the OS.
    #[must_use]
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Auto => Self::detect(),
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Color used for a device kind in lists and on the rail.
    #[must_use]
    pub const fn device_color(&self, kind: DeviceKind) -> Color {
        match kind {
            DeviceKind::Breaker => self.breaker,
            DeviceKind::Rcd => self.rcd,
            DeviceKind::Rcbo => self.rcbo,
            DeviceKind::Relay => self.relay,
            DeviceKind::Contactor => self.contactor,
            DeviceKind::Meter => self.meter,
        }
    }
}
