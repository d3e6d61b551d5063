use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use phosphor_core::core::machine::Machine;
use phosphor_machines::Coco;

mod audio;
mod config;
mod emulator;
mod host_sdl;
mod overlay;
mod rom_path;
mod screenshot;
mod video;

use config::Config;
use host_sdl::HostSdl;

/// A Motorola 6809E home-computer emulator.
#[derive(Parser, Debug)]
#[command(name = "phosphor", version, about)]
struct Args {
    /// Path to the system ROM: a loose .rom/.bin file, a directory, or a
    /// MAME-style .zip archive.
    #[arg(long)]
    rom: Option<String>,

    /// Path to a cassette image to mount at startup.
    #[arg(long)]
    cassette: Option<String>,

    /// Window scale factor.
    #[arg(long)]
    scale: Option<u32>,

    /// Path to the TOML config file (defaults to the platform config dir).
    #[arg(long)]
    config: Option<String>,

    /// Disable the on-screen FPS overlay.
    #[arg(long)]
    no_fps: bool,
}

fn main() {
    let args = Args::parse();

    let config_path = args
        .config
        .map(PathBuf::from)
        .or_else(Config::default_path);
    let mut cfg = config_path
        .as_deref()
        .map(Config::load)
        .unwrap_or_default();

    if let Some(rom) = &args.rom {
        cfg.rom_path = Some(rom.clone());
    }
    if let Some(cas) = &args.cassette {
        cfg.cassette_path = Some(cas.clone());
    }
    if let Some(scale) = args.scale {
        cfg.scale = scale;
    }

    let Some(rom_path) = cfg.rom_path.clone() else {
        eprintln!("error: no ROM path given (use --rom or set one in the config file)");
        std::process::exit(1);
    };

    let rom_set = match rom_path::load_rom_set("coco", &rom_path) {
        Ok(set) => set,
        Err(e) => {
            eprintln!("error: failed to load ROM from {rom_path}: {e}");
            std::process::exit(1);
        }
    };

    let sdl_context = sdl2::init().expect("Failed to initialize SDL2");
    let audio_subsystem = sdl_context.audio().expect("Failed to init SDL audio");
    let audio_init = audio::init(&audio_subsystem, cfg.audio_sample_rate);
    let audio_ring = audio_init.as_ref().map(|(_, ring, _)| ring.clone());

    let cassette_path = cfg.cassette_path.clone().map(PathBuf::from);
    let host = Rc::new(RefCell::new(HostSdl::from_config(&cfg, audio_ring)));

    let mut machine = Coco::new(host.clone());
    if let Err(e) = machine.load_rom_set(&rom_set) {
        eprintln!("error: failed to map system ROM: {e}");
        std::process::exit(1);
    }
    if cassette_path.is_some() {
        // The cassette file itself is opened lazily on the motor-on
        // transition (§4.6); HostSdl::from_config already has the path.
    }
    machine.reset();

    if let Some((device, _, _)) = &audio_init {
        device.resume();
    }

    emulator::run(&mut machine, &host, cfg.scale, !args.no_fps);

    if let Some((device, _, fade_out)) = &audio_init {
        fade_out.store(true, std::sync::atomic::Ordering::Relaxed);
        std::thread::sleep(audio::fade_out_duration());
        device.pause();
    }

    if let Some(path) = config_path {
        if let Err(e) = cfg.save(&path) {
            eprintln!("warning: failed to save config {}: {e}", path.display());
        }
    }
}
