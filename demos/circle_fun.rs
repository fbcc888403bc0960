//! 点击圆形切换颜色
//!
//! 没有绘制层，颜色变化反映在窗口标题和日志里。按 Esc 退出。
//!
//! ```bash
//! cargo run --example circle_fun -- --width 800 --height 600
//! ```

use gametails::component::{Body, Collidable, GameObject, ObjectContext};
use gametails::core::{log, Config, Key, KeyEvent, MouseButtonEvent, MouseMoveEvent, Result};
use gametails::host::WinitHost;
use gametails::math::{point, Circle, Color, Point};
use gametails::stage::{Game, Stage};
use gametails::{app_info, app_error};

struct PokeyCircle {
    body: Body,
    radius: i32,
    color: Color,
}

impl PokeyCircle {
    fn new(center: Point, radius: i32) -> Self {
        Self {
            body: Body::new(center),
            radius,
            color: Color::BLUE,
        }
    }

    fn color_name(&self) -> &'static str {
        if self.color == Color::BLUE { "blue" } else { "green" }
    }
}

impl Collidable for PokeyCircle {
    fn is_colliding_with(&self, p: Point) -> bool {
        Circle::new(self.body.position(), self.radius).contains(p)
    }
}

impl GameObject<WinitHost> for PokeyCircle {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn on_mouse_enter(&mut self, _ctx: &mut ObjectContext<'_, WinitHost>, event: &MouseMoveEvent) -> Result<()> {
        app_info!(x = event.pos.x, y = event.pos.y, "Pointer entered the circle");
        Ok(())
    }

    fn on_mouse_exit(&mut self, _ctx: &mut ObjectContext<'_, WinitHost>, event: &MouseMoveEvent) -> Result<()> {
        app_info!(x = event.pos.x, y = event.pos.y, "Pointer left the circle");
        Ok(())
    }

    fn on_mouse_down(&mut self, ctx: &mut ObjectContext<'_, WinitHost>, _event: &MouseButtonEvent) -> Result<()> {
        self.color = if self.color == Color::BLUE { Color::GREEN } else { Color::BLUE };
        ctx.surface().set_title(&format!("Circle fun: {}", self.color_name()));
        app_info!(color = self.color_name(), "Circle poked");
        Ok(())
    }
}

struct CircleFun;

impl Game<WinitHost> for CircleFun {
    fn on_key_down(&mut self, stage: &mut Stage<WinitHost>, event: &KeyEvent) -> Result<()> {
        if event.key == Key::Escape {
            stage.stop();
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let mut config = Config::from_file_or_default("config.toml");
    config.window.title = "Circle fun: blue".to_string();
    config.apply_args(std::env::args());
    config.validate()?;

    let log_file = config.logging.file_output.then(|| config.logging.log_file.as_str());
    log::init_logger(config.logging.level, config.logging.file_output, log_file);

    let mut stage = Stage::open(&config.window)?;
    let circle = stage.spawn(PokeyCircle::new(point(20, 20), 50));
    app_info!(%circle, "Circle attached");

    if let Err(e) = stage.run(&mut CircleFun) {
        app_error!("Main loop failed: {}", e);
        return Err(e.into());
    }
    Ok(())
}
