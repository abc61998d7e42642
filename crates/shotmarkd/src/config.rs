// Author: Dustin Pilgrim
// License: MIT

use std::env;
use std::path::{Path, PathBuf};

use rune_cfg::RuneConfig;
use shotmark_core::{Colour, ShotConfig};

#[derive(Debug, Clone)]
pub struct ShotmarkConfig {
    pub screenshot_directory: PathBuf,
    /// TTF/OTF used for text annotations and the info label.
    pub font_path: Option<PathBuf>,
    /// Use this image instead of asking the portal for a screenshot.
    pub screen_image: Option<PathBuf>,
    pub shot: ShotConfig,
}

impl Default for ShotmarkConfig {
    fn default() -> Self {
        Self {
            screenshot_directory: default_screenshot_dir(),
            font_path: None,
            screen_image: None,
            shot: ShotConfig::default(),
        }
    }
}

pub fn load() -> Result<ShotmarkConfig, String> {
    load_from(&default_user_config_path())
}

pub fn load_from(path: &Path) -> Result<ShotmarkConfig, String> {
    if !path.exists() {
        return Ok(ShotmarkConfig::default());
    }

    let rc = RuneConfig::from_file(path).map_err(|e| format!("failed to read config: {e}"))?;

    parse_config(&rc)
}

fn parse_config(rc: &RuneConfig) -> Result<ShotmarkConfig, String> {
    let mut cfg = ShotmarkConfig::default();

    if !rc.has("shotmark") {
        return Ok(cfg);
    }

    if let Some(dir) = get(rc, "screenshot_directory")? {
        cfg.screenshot_directory = expand_env(&dir);
    }
    if let Some(p) = get(rc, "font_path")? {
        cfg.font_path = Some(expand_env(&p));
    }
    if let Some(p) = get(rc, "screen_image")? {
        cfg.screen_image = Some(expand_env(&p));
    }

    let shot = &mut cfg.shot;

    if let Some(v) = get(rc, "section_colour")? {
        shot.section_colour = parse_colour("section_colour", &v)?;
    }
    if let Some(v) = get(rc, "section_border")? {
        shot.section_border = parse_int("section_border", &v, 1)?;
    }
    if let Some(v) = get(rc, "anchor_border")? {
        shot.anchor_border = parse_int("anchor_border", &v, 1)?;
    }
    if let Some(v) = get(rc, "mask_colour")? {
        shot.mask_colour = parse_colour("mask_colour", &v)?;
    }
    if let Some(v) = get(rc, "mask_opacity")? {
        shot.mask_opacity = parse_opacity("mask_opacity", &v)?;
    }
    if let Some(v) = get(rc, "pen_colour")? {
        shot.pen.colour = parse_colour("pen_colour", &v)?;
    }
    if let Some(v) = get(rc, "pen_size")? {
        shot.pen.size = parse_int("pen_size", &v, 1)?;
    }
    if let Some(v) = get(rc, "pen_font")? {
        let v = v.trim();
        if v.is_empty() {
            return Err("config error at shotmark.pen_font: must not be empty".into());
        }
        shot.pen.font = v.to_string();
    }

    Ok(cfg)
}

fn get(rc: &RuneConfig, key: &str) -> Result<Option<String>, String> {
    rc.get_optional::<String>(&format!("shotmark.{key}"))
        .map_err(|e| format!("config error at shotmark.{key}: {e}"))
}

fn parse_colour(key: &str, s: &str) -> Result<Colour, String> {
    Colour::parse_hex(s).map_err(|e| format!("config error at shotmark.{key}: {e}"))
}

fn parse_int(key: &str, s: &str, min: i32) -> Result<i32, String> {
    let v = s
        .trim()
        .parse::<i32>()
        .map_err(|_| format!("config error at shotmark.{key}: expected an integer, got \"{}\"", s.trim()))?;

    if v < min {
        return Err(format!("config error at shotmark.{key}: must be at least {min}"));
    }
    Ok(v)
}

fn parse_opacity(key: &str, s: &str) -> Result<f32, String> {
    let v = s
        .trim()
        .parse::<f32>()
        .map_err(|_| format!("config error at shotmark.{key}: expected a number, got \"{}\"", s.trim()))?;

    if !(0.0..=1.0).contains(&v) {
        return Err(format!("config error at shotmark.{key}: expected 0.0..=1.0"));
    }
    Ok(v)
}

fn expand_env(s: &str) -> PathBuf {
    let mut out = s.trim().to_string();

    if out.contains("$env.HOME") {
        if let Ok(home) = env::var("HOME") {
            out = out.replace("$env.HOME", &home);
        }
    }

    PathBuf::from(out)
}

pub fn default_user_config_path() -> PathBuf {
    let dir: PathBuf = if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg)
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| ".".into());
        PathBuf::from(home).join(".config")
    };

    dir.join("shotmark").join("shotmark.rune")
}

fn default_screenshot_dir() -> PathBuf {
    let home = env::var("HOME").unwrap_or_else(|_| ".".into());
    PathBuf::from(home).join("Pictures").join("Screenshots")
}
