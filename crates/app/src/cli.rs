//! Command-line flags, `--flag=value` style.

use std::path::PathBuf;

use platform::ViewerConfig;

const DEFAULT_WIDTH: u32 = 800;
const DEFAULT_HEIGHT: u32 = 600;

#[derive(Clone, Debug)]
pub struct CliArgs {
    pub backends: wgpu::Backends,
    pub width: u32,
    pub height: u32,
    pub show_fps: bool,
    /// Overrides the launcher file next to the executable.
    pub path_file: Option<PathBuf>,
    /// Skips the launcher file entirely.
    pub model: Option<PathBuf>,
}

impl CliArgs {
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let (width, height) = parse_size_args(&args);
        Self {
            backends: parse_backend_arg(&args),
            width,
            height,
            show_fps: parse_show_fps_arg(&args),
            path_file: parse_path_arg(&args, "--path-file="),
            model: parse_path_arg(&args, "--model="),
        }
    }

    pub fn viewer_config(&self) -> ViewerConfig {
        ViewerConfig {
            backends: self.backends,
            width: self.width,
            height: self.height,
            show_fps: self.show_fps,
        }
    }
}

fn parse_backend_arg(args: &[String]) -> wgpu::Backends {
    // Accept: --gpu-backend=auto|vulkan|dx12|metal|gl
    let mut backends = wgpu::Backends::all(); // default = auto
    for arg in args {
        if let Some(val) = arg.strip_prefix("--gpu-backend=") {
            backends = match val.to_ascii_lowercase().as_str() {
                "auto" => wgpu::Backends::all(),
                "vulkan" | "vk" => wgpu::Backends::VULKAN,
                "dx12" | "d3d12" => wgpu::Backends::DX12,
                "metal" | "mtl" => wgpu::Backends::METAL,
                "gl" | "opengl" | "gles" => wgpu::Backends::GL,
                other => {
                    log::warn!("Unknown backend '{}', falling back to auto.", other);
                    wgpu::Backends::all()
                }
            };
        }
    }
    backends
}

fn parse_show_fps_arg(args: &[String]) -> bool {
    // --show-fps[=on|off], off by default
    for arg in args {
        if arg == "--show-fps" {
            return true;
        }
        if let Some(val) = arg.strip_prefix("--show-fps=") {
            return matches!(
                val.to_ascii_lowercase().as_str(),
                "1" | "true" | "on" | "yes"
            );
        }
    }
    false
}

fn parse_size_args(args: &[String]) -> (u32, u32) {
    let mut w: Option<u32> = None;
    let mut h: Option<u32> = None;

    for arg in args {
        if let Some(v) = arg.strip_prefix("--size=") {
            if let Some((sw, sh)) = v.split_once('x').or_else(|| v.split_once('X')) {
                if let (Ok(pw), Ok(ph)) = (sw.parse::<u32>(), sh.parse::<u32>()) {
                    w = Some(pw);
                    h = Some(ph);
                }
            }
        } else if let Some(v) = arg.strip_prefix("--width=") {
            if let Ok(pw) = v.parse::<u32>() {
                w = Some(pw);
            }
        } else if let Some(v) = arg.strip_prefix("--height=") {
            if let Ok(ph) = v.parse::<u32>() {
                h = Some(ph);
            }
        }
    }

    let ww = w.unwrap_or(DEFAULT_WIDTH).max(1);
    let hh = h.unwrap_or(DEFAULT_HEIGHT).max(1);
    (ww, hh)
}

/// Last non-empty `<prefix><path>` wins.
fn parse_path_arg(args: &[String], prefix: &str) -> Option<PathBuf> {
    args.iter()
        .filter_map(|arg| arg.strip_prefix(prefix))
        .filter(|v| !v.is_empty())
        .last()
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = CliArgs::parse(["blockview"]);
        assert_eq!(cli.backends, wgpu::Backends::all());
        assert_eq!((cli.width, cli.height), (800, 600));
        assert!(!cli.show_fps);
        assert!(cli.path_file.is_none());
        assert!(cli.model.is_none());
    }

    #[test]
    fn every_flag() {
        let cli = CliArgs::parse([
            "blockview",
            "--gpu-backend=VK",
            "--size=1024x768",
            "--height=700",
            "--show-fps=on",
            "--path-file=launch/path.json",
            "--model=models/stone.json",
        ]);
        assert_eq!(cli.backends, wgpu::Backends::VULKAN);
        assert_eq!((cli.width, cli.height), (1024, 700));
        assert!(cli.show_fps);
        assert_eq!(cli.path_file, Some(PathBuf::from("launch/path.json")));
        assert_eq!(cli.model, Some(PathBuf::from("models/stone.json")));

        let config = cli.viewer_config();
        assert_eq!((config.width, config.height), (1024, 700));
    }

    #[test]
    fn bad_values_fall_back() {
        let cli = CliArgs::parse([
            "blockview",
            "--gpu-backend=glide",
            "--size=big",
            "--width=0",
            "--show-fps=nope",
            "--model=",
        ]);
        assert_eq!(cli.backends, wgpu::Backends::all());
        assert_eq!((cli.width, cli.height), (1, 600));
        assert!(!cli.show_fps);
        assert!(cli.model.is_none());
    }
}
