use sdl2::keyboard::Keycode;

use softshade::display::{self, Frame, PixelGrid};
use softshade::math::mat4::Mat4;
use softshade::math::vec3::Vec3;
use softshade::mesh::Mesh;
use softshade::shading::{ShadingMode, ShadingStrategy};
use softshade::texture::Texture;
use softshade::viewport::Viewport;
use softshade::window::{FrameLimiter, Window, WindowEvent};

fn print_modes() {
    eprintln!("Possible shading algorithms are:");
    eprintln!("    Flat");
    eprintln!("    Gourard");
    eprintln!("    Phong");
    eprintln!("    Spherical");
}

fn parse_args(args: &[String]) -> (ShadingMode, String) {
    match args {
        [_, filename] => (ShadingMode::default(), filename.clone()),
        [_, flag, mode, filename] if flag == "-s" => match ShadingMode::from_name(mode) {
            Some(mode) => (mode, filename.clone()),
            None => {
                eprintln!("Error: Unrecognized algorithm '{mode}'.\n");
                print_modes();
                std::process::exit(1);
            }
        },
        _ => {
            let program = args.first().map(String::as_str).unwrap_or("softshade");
            eprintln!("Usage: {program} [-s shading_algorithm] filename\n");
            print_modes();
            std::process::exit(1);
        }
    }
}

/// Places the object and floor in front of the view at the origin: both
/// move back into the scene, the floor drops below the object, and the
/// whole arrangement tilts so the floor is visible.
fn place_scene(object: &mut Mesh, floor: &mut Mesh) {
    let back = Mat4::translation(0.0, 0.0, -500.0);
    object.apply_transform(&back);
    floor.apply_transform(&back);

    if object.vertex_count() > 0 {
        let min_y = object.vertices().iter().map(|v| v.y).fold(f32::MAX, f32::min);
        floor.apply_transform(&Mat4::translation(0.0, min_y, 0.0));
    }

    let tilt = Mat4::rotation_x(20.0);
    object.apply_transform(&tilt);
    floor.apply_transform(&tilt);
}

#[allow(clippy::too_many_arguments)]
fn render_frame(
    strategy: &dyn ShadingStrategy,
    object: &Mesh,
    floor: &Mesh,
    viewport: Viewport,
    light_position: Vec3,
    view_position: Vec3,
    environment_map: Option<&Texture>,
    anti_alias: bool,
) -> Frame {
    let mut points = Vec::new();
    strategy.shade(
        object,
        floor,
        viewport,
        light_position,
        view_position,
        &mut points,
        environment_map,
    );

    let grid = PixelGrid::from_points(&points, viewport);
    let grid = if anti_alias { grid.box_blur() } else { grid };
    grid.to_frame()
}

/// Applies a key press to the scene. Returns whether anything changed and
/// the frame needs re-rendering.
fn handle_key(
    key: Keycode,
    object: &mut Mesh,
    strategy: &mut dyn ShadingStrategy,
    anti_alias: &mut bool,
) -> bool {
    let params = strategy.params_mut();
    match key {
        // Move the object left, up, down, or right.
        Keycode::A => object.apply_transform(&Mat4::translation(-5.0, 0.0, 0.0)),
        Keycode::W => object.apply_transform(&Mat4::translation(0.0, 5.0, 0.0)),
        Keycode::D => object.apply_transform(&Mat4::translation(5.0, 0.0, 0.0)),
        Keycode::S => object.apply_transform(&Mat4::translation(0.0, -5.0, 0.0)),

        // Rotate the object left, up, down, or right.
        Keycode::J => object.apply_transform(&Mat4::rotation_y(-5.0)),
        Keycode::I => object.apply_transform(&Mat4::rotation_x(-5.0)),
        Keycode::L => object.apply_transform(&Mat4::rotation_y(5.0)),
        Keycode::K => object.apply_transform(&Mat4::rotation_x(5.0)),

        // Scale the object up and down.
        Keycode::Plus => object.apply_transform(&Mat4::scaling(1.1, 1.1, 1.1)),
        Keycode::Minus => object.apply_transform(&Mat4::scaling(0.9, 0.9, 0.9)),

        // Reflection coefficients.
        Keycode::R => params.set_k_a(params.k_a() + 0.1),
        Keycode::F => {
            if params.k_a() >= 0.1 {
                params.set_k_a(params.k_a() - 0.1);
            }
        }
        Keycode::T => params.set_k_d(params.k_d() + 0.1),
        Keycode::G => {
            if params.k_d() >= 0.1 {
                params.set_k_d(params.k_d() - 0.1);
            }
        }
        Keycode::Y => params.set_k_s(params.k_s() + 0.1),
        Keycode::H => {
            if params.k_s() >= 0.1 {
                params.set_k_s(params.k_s() - 0.1);
            }
        }

        // Light intensities.
        Keycode::P => params.set_i_a(params.i_a() + 0.1),
        Keycode::Semicolon => {
            if params.i_a() >= 0.1 {
                params.set_i_a(params.i_a() - 0.1);
            }
        }
        Keycode::LeftBracket => params.set_i_d(params.i_d() + 0.1),
        Keycode::Quote => {
            if params.i_d() >= 0.1 {
                params.set_i_d(params.i_d() - 0.1);
            }
        }
        Keycode::RightBracket => params.set_i_s(params.i_s() + 0.1),
        Keycode::Hash => {
            if params.i_s() >= 0.1 {
                params.set_i_s(params.i_s() - 0.1);
            }
        }

        // Specular exponent.
        Keycode::Backslash => params.set_alpha(params.alpha() + 5.0),
        Keycode::Z => {
            if params.alpha() >= 5.0 {
                params.set_alpha(params.alpha() - 5.0);
            }
        }

        // Anti-aliasing and shadows.
        Keycode::Slash => *anti_alias = !*anti_alias,
        Keycode::Period => params.toggle_shadows(),

        // Channel strengths.
        Keycode::X => {
            if params.red_strength() <= 0.9 {
                params.set_red_strength(params.red_strength() + 0.1);
            }
        }
        Keycode::C => {
            if params.red_strength() >= 0.1 {
                params.set_red_strength(params.red_strength() - 0.1);
            }
        }
        Keycode::V => {
            if params.green_strength() <= 0.9 {
                params.set_green_strength(params.green_strength() + 0.1);
            }
        }
        Keycode::B => {
            if params.green_strength() >= 0.1 {
                params.set_green_strength(params.green_strength() - 0.1);
            }
        }
        Keycode::N => {
            if params.blue_strength() <= 0.9 {
                params.set_blue_strength(params.blue_strength() + 0.1);
            }
        }
        Keycode::M => {
            if params.blue_strength() >= 0.1 {
                params.set_blue_strength(params.blue_strength() - 0.1);
            }
        }

        _ => return false,
    }

    true
}

fn main() -> Result<(), String> {
    let args: Vec<String> = std::env::args().collect();
    let (mode, filename) = parse_args(&args);

    let mut object = Mesh::from_obj(&filename).map_err(|e| e.to_string())?;
    object.fit_to_range(400.0);
    let mut floor = Mesh::from_obj("objects/floor.obj").map_err(|e| e.to_string())?;

    place_scene(&mut object, &mut floor);

    let floor_texture = Texture::from_file("textures/floor.jpg").map_err(|e| e.to_string())?;
    let environment_map = match mode {
        ShadingMode::Spherical => {
            Some(Texture::from_file("textures/gl_map.jpg").map_err(|e| e.to_string())?)
        }
        _ => None,
    };

    let mut strategy = mode.create(floor_texture);

    let viewport = Viewport::centered(
        display::WINDOW_WIDTH as i32,
        display::WINDOW_HEIGHT as i32,
    );
    let light_position = Vec3::new(75.0, 75.0, 0.0);
    let view_position = Vec3::new(0.0, 0.0, 0.0);

    let mut window = Window::new(
        &format!("Software Shading - {mode}"),
        display::WINDOW_WIDTH,
        display::WINDOW_HEIGHT,
    )?;
    let mut limiter = FrameLimiter::new(&window);

    let mut anti_alias = false;
    let mut dirty = true;

    loop {
        match window.poll_events() {
            WindowEvent::Quit => break,
            WindowEvent::Key(key) => {
                if handle_key(key, &mut object, strategy.as_mut(), &mut anti_alias) {
                    dirty = true;
                }
            }
            WindowEvent::None => {}
        }

        if dirty {
            let frame = render_frame(
                strategy.as_ref(),
                &object,
                &floor,
                viewport,
                light_position,
                view_position,
                environment_map.as_ref(),
                anti_alias,
            );
            window.present(frame.as_bytes())?;
            dirty = false;
        }

        limiter.wait_and_get_delta(&window);
    }

    Ok(())
}
