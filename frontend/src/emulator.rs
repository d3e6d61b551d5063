use std::cell::RefCell;
use std::rc::Rc;

use phosphor_core::core::machine::Machine;
use phosphor_machines::Coco;
use sdl2::event::Event;
use sdl2::keyboard::Scancode;

use crate::host_sdl::HostSdl;
use crate::overlay;
use crate::screenshot;
use crate::video::Video;

/// Drive the SDL event loop, pumping keyboard/reset/joystick state into
/// `HostSdl` and running one `Machine` frame per iteration. Unlike the
/// arcade frontends this lineage also drives, the CoCo machine ignores
/// `Machine::set_input` entirely — all input arrives through the `Host`
/// trait instead (§6), so events are routed to `host` directly rather than
/// through a `KeyMap`.
pub fn run(machine: &mut Coco<HostSdl>, host: &Rc<RefCell<HostSdl>>, scale: u32, show_fps: bool) {
    let sdl_context = sdl2::init().expect("Failed to initialize SDL2");
    let sdl_video = sdl_context.video().expect("Failed to init SDL video");

    let (width, height) = machine.display_size();
    let mut video = Video::new(&sdl_video, "Phosphor CoCo Emulator", width, height, scale);
    let mut event_pump = sdl_context.event_pump().expect("Failed to get event pump");

    let mut framebuffer = vec![0u8; (width * height * 3) as usize];

    let (reset_sc, fire_sc) = {
        let h = host.borrow();
        (h.reset_scancode(), h.joystick_fire_scancode())
    };

    let mut frame_count: u64 = 0;
    let mut last_fps_check = std::time::Instant::now();
    let mut fps_text = String::from("--.-");

    'main: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'main,

                Event::KeyDown {
                    scancode: Some(Scancode::Escape),
                    ..
                } => break 'main,

                Event::KeyDown {
                    scancode: Some(Scancode::PrintScreen),
                    ..
                } => {
                    let (w, h) = machine.display_size();
                    let path = std::path::Path::new("phosphor-screenshot.png");
                    match screenshot::save_png(path, &framebuffer, w, h) {
                        Ok(()) => eprintln!("saved screenshot to {}", path.display()),
                        Err(e) => eprintln!("warning: failed to save screenshot: {e}"),
                    }
                }

                Event::KeyDown {
                    scancode: Some(sc),
                    repeat: false,
                    ..
                } => {
                    let mut h = host.borrow_mut();
                    if sc == reset_sc {
                        h.request_reset(false);
                    } else if sc == fire_sc {
                        h.set_joystick_button(true);
                    } else {
                        h.push_key_event(sc, true);
                    }
                }

                Event::KeyUp {
                    scancode: Some(sc), ..
                } => {
                    let mut h = host.borrow_mut();
                    if sc == reset_sc {
                        h.clear_reset_request();
                    } else if sc == fire_sc {
                        h.set_joystick_button(false);
                    } else {
                        h.push_key_event(sc, false);
                    }
                }

                _ => {}
            }
        }

        machine.run_frame();

        if machine.take_loader_escape_request() {
            // The interactive loader/menu UI is an out-of-scope external
            // collaborator (§1); this frontend has none, so F1 is a no-op
            // beyond this diagnostic.
            eprintln!("note: loader escape requested (F1) — no loader UI in this frontend");
        }

        let (w, h) = machine.display_size();
        let needed = (w * h * 3) as usize;
        if framebuffer.len() != needed {
            framebuffer.resize(needed, 0);
            video.resize(w, h);
        }
        machine.render_frame(&mut framebuffer);

        if show_fps {
            overlay::draw_fps(&mut framebuffer, w as usize, &fps_text);
        }
        video.present(&framebuffer);

        frame_count += 1;
        let elapsed = last_fps_check.elapsed();
        if elapsed.as_secs_f32() >= 1.0 {
            fps_text = format!("{:.1}", frame_count as f32 / elapsed.as_secs_f32());
            frame_count = 0;
            last_fps_check = std::time::Instant::now();
        }
    }
}
