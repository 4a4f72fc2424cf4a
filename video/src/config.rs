use strata_abi::draw::PixelColor;
use strata_abi::Point;
use strata_gfx::desktop::DESKTOP_BG_COLOR;
use strata_lib::KlogLevel;

const DEFAULT_MOUSE_POSITION: Point = Point::new(200, 200);
const DEFAULT_LOG_LEVEL: KlogLevel = KlogLevel::Warn;

/// Start-up knobs for the desktop, read from the kernel command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompositorConfig {
    pub desktop_bg: PixelColor,
    pub mouse_position: Point,
    pub log_level: KlogLevel,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            desktop_bg: DESKTOP_BG_COLOR,
            mouse_position: DEFAULT_MOUSE_POSITION,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

fn parse_color(value: &str) -> Option<PixelColor> {
    let hex = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix('#'))
        .unwrap_or(value);
    if hex.len() != 6 {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().map(PixelColor::from_u32)
}

fn parse_point(value: &str) -> Option<Point> {
    let (x, y) = value.split_once(',')?;
    Some(Point::new(x.parse().ok()?, y.parse().ok()?))
}

pub fn config_from_cmdline(cmdline: Option<&str>) -> CompositorConfig {
    let mut cfg = CompositorConfig::default();
    if let Some(cmdline) = cmdline {
        for token in cmdline.split_whitespace() {
            if let Some(value) = token.strip_prefix("desktop.bg=") {
                if let Some(color) = parse_color(value) {
                    cfg.desktop_bg = color;
                }
            } else if let Some(value) = token.strip_prefix("mouse.pos=") {
                if let Some(pos) = parse_point(value) {
                    cfg.mouse_position = pos;
                }
            } else if let Some(value) = token.strip_prefix("klog=") {
                if let Some(level) = KlogLevel::parse(value) {
                    cfg.log_level = level;
                }
            }
        }
    }
    cfg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_cmdline() {
        let cfg = config_from_cmdline(None);
        assert_eq!(cfg, CompositorConfig::default());
        assert_eq!(cfg.desktop_bg, PixelColor::rgb(45, 118, 237));
    }

    #[test]
    fn test_parses_known_tokens() {
        let cfg = config_from_cmdline(Some(
            "quiet desktop.bg=#102030 desktop.fg=0xFFEE00 mouse.pos=10,-4 klog=debug",
        ));
        assert_eq!(cfg.desktop_bg, PixelColor::rgb(0x10, 0x20, 0x30));
        assert_eq!(cfg.mouse_position, Point::new(10, -4));
        assert_eq!(cfg.log_level, KlogLevel::Debug);
    }

    #[test]
    fn test_malformed_values_keep_defaults() {
        let cfg = config_from_cmdline(Some("desktop.bg=12345 desktop.bg=0xGGGGGG mouse.pos=3 klog=loud"));
        assert_eq!(cfg, CompositorConfig::default());
    }
}
