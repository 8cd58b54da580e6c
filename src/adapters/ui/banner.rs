//! ASCII welcome banner with a vertical color gradient (COMPOSE).

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Coral (#ff6b6b).
const CORAL: (u8, u8, u8) = (0xff, 0x6b, 0x6b);
/// Violet (#845ef7).
const VIOLET: (u8, u8, u8) = (0x84, 0x5e, 0xf7);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

/// Prints the welcome banner: "COMPOSE" in figlet standard font with a
/// coral-to-violet gradient, then the version line.
pub fn print_welcome() {
    let mut out = stdout();
    let Ok(font) = FIGfont::standard() else {
        let _ = writeln!(out, "COMPOSE v{}", env!("CARGO_PKG_VERSION"));
        return;
    };
    let Some(figure) = font.convert("COMPOSE") else {
        let _ = writeln!(out, "COMPOSE v{}", env!("CARGO_PKG_VERSION"));
        return;
    };
    let art = figure.to_string();
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(CORAL, VIOLET, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let version = env!("CARGO_PKG_VERSION");
    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: VIOLET.0,
        g: VIOLET.1,
        b: VIOLET.2,
    }));
    let _ = out.execute(Print(format!("v{version} — create something\r\n")));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}
