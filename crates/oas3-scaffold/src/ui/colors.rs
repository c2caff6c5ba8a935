use std::{fmt::Display, io::IsTerminal};

use clap::builder::styling::{AnsiColor, Color as ClapColor, RgbColor, Style, Styles};
use comfy_table::{Cell, Color as ComfyColor};
use crossterm::style::{Color, ContentStyle, StyledContent};

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ColorMode {
  Always,
  Auto,
  Never,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ThemeMode {
  Dark,
  Light,
  Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
  Dark,
  Light,
}

/// One RGB triple per role.
struct Palette {
  timestamp: (u8, u8, u8),
  primary: (u8, u8, u8),
  accent: (u8, u8, u8),
  label: (u8, u8, u8),
  value: (u8, u8, u8),
  success: (u8, u8, u8),
}

const DARK: Palette = Palette {
  timestamp: (118, 166, 166),
  primary: (191, 126, 4),
  accent: (166, 84, 55),
  label: (217, 164, 4),
  value: (242, 211, 56),
  success: (118, 166, 166),
};

const LIGHT: Palette = Palette {
  timestamp: (92, 62, 38),
  primary: (70, 42, 25),
  accent: (211, 99, 70),
  label: (176, 103, 66),
  value: (199, 146, 76),
  success: (34, 142, 90),
};

/// Role-based terminal colors. Every role is `None` when color is off.
pub struct Colors {
  enabled: bool,
  theme: Theme,
}

impl Colors {
  pub const fn new(enabled: bool, theme: Theme) -> Self {
    Self { enabled, theme }
  }

  const fn palette(&self) -> &'static Palette {
    match self.theme {
      Theme::Dark => &DARK,
      Theme::Light => &LIGHT,
    }
  }

  pub const fn enabled(&self) -> bool {
    self.enabled
  }

  const fn pick(&self, (r, g, b): (u8, u8, u8)) -> Option<Color> {
    if self.enabled { Some(Color::Rgb { r, g, b }) } else { None }
  }

  pub const fn timestamp(&self) -> Option<Color> {
    self.pick(self.palette().timestamp)
  }

  pub const fn primary(&self) -> Option<Color> {
    self.pick(self.palette().primary)
  }

  pub const fn accent(&self) -> Option<Color> {
    self.pick(self.palette().accent)
  }

  pub const fn label(&self) -> Option<Color> {
    self.pick(self.palette().label)
  }

  pub const fn value(&self) -> Option<Color> {
    self.pick(self.palette().value)
  }

  pub const fn success(&self) -> Option<Color> {
    self.pick(self.palette().success)
  }

  /// Help output styling; clap decides on its own whether to emit it.
  pub fn clap_styles() -> Styles {
    let rgb = |(r, g, b): (u8, u8, u8)| Some(ClapColor::Rgb(RgbColor(r, g, b)));

    Styles::styled()
      .header(Style::new().bold().underline().fg_color(rgb(DARK.label)))
      .usage(Style::new().bold().fg_color(rgb(DARK.label)))
      .literal(Style::new().fg_color(rgb(DARK.success)))
      .placeholder(Style::new().fg_color(rgb(DARK.timestamp)))
      .error(Style::new().bold().fg_color(Some(ClapColor::Ansi(AnsiColor::Red))))
      .valid(Style::new().fg_color(rgb(DARK.success)))
      .invalid(Style::new().bold().fg_color(rgb(DARK.accent)))
  }
}

/// Foreground-styles `content`; without a color it prints with no escape codes at all.
pub fn paint<D: Display>(content: D, color: Option<Color>) -> StyledContent<D> {
  let style = ContentStyle {
    foreground_color: color,
    ..ContentStyle::default()
  };
  StyledContent::new(style, content)
}

/// `comfy-table` has its own color type; only the variants `Colors` produces matter.
fn to_comfy(color: Color) -> ComfyColor {
  match color {
    Color::Rgb { r, g, b } => ComfyColor::Rgb { r, g, b },
    Color::AnsiValue(value) => ComfyColor::AnsiValue(value),
    _ => ComfyColor::Reset,
  }
}

pub fn table_cell<T: Into<Cell>>(content: T, color: Option<Color>) -> Cell {
  let cell = content.into();
  match color {
    Some(color) => cell.fg(to_comfy(color)),
    None => cell,
  }
}

pub fn colors_enabled(mode: ColorMode) -> bool {
  match mode {
    ColorMode::Always => true,
    ColorMode::Never => false,
    ColorMode::Auto => std::io::stdout().is_terminal(),
  }
}

pub fn detect_theme(mode: ThemeMode) -> Theme {
  match mode {
    ThemeMode::Dark => Theme::Dark,
    ThemeMode::Light => Theme::Light,
    ThemeMode::Auto => detect_terminal_theme(),
  }
}

/// `COLORFGBG` is `fg;bg`; background indices of 8 and above are light.
fn detect_terminal_theme() -> Theme {
  if let Ok(colorfgbg) = std::env::var("COLORFGBG")
    && let Some(background) = colorfgbg.rsplit(';').next()
    && let Ok(index) = background.parse::<u8>()
  {
    return if index >= 8 { Theme::Light } else { Theme::Dark };
  }

  Theme::Dark
}
