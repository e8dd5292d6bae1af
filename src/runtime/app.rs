use std::path::Path;
use std::rc::Rc;
use std::time::Instant;

use anyhow::Result;
use softbuffer::Context;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::ModifiersState;
use winit::window::{CursorIcon, Window};

use codearea::commands::{Cmd, Damage};
use codearea::handler::DefaultCommandHandler;
use codearea::layout::mapper::{self, Zone};
use codearea::messages::{EditorMsg, Msg, UiMsg};
use codearea::model::CodeArea;
use codearea::theme::Theme;
use codearea::update::update;
use codearea::view::frame::CodeFont;

use super::input::{key_to_msg, resize_msg};
use super::renderer::Renderer;

/// Font data and size the renderer is built from once a window exists
pub struct FontSource {
    pub data: Vec<u8>,
    pub size: f32,
}

pub struct App {
    area: CodeArea,
    handler: DefaultCommandHandler,
    theme: Theme,
    font: FontSource,
    title: String,
    renderer: Option<Renderer>,
    window: Option<Rc<Window>>,
    context: Option<Context<Rc<Window>>>,
    modifiers: ModifiersState,
    mouse_position: Option<(f64, f64)>,
    left_mouse_down: bool,
    /// Damage accumulated since the last frame
    damage: Damage,
    /// Reveal the caret once the first layout exists
    reveal_on_start: bool,
}

impl App {
    pub fn new(area: CodeArea, theme: Theme, font: FontSource, file: &Path) -> Self {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());
        let reveal_on_start = area.caret().data_position > 0;
        Self {
            area,
            handler: DefaultCommandHandler::default(),
            theme,
            font,
            title: format!("{} - codearea-view", name),
            renderer: None,
            window: None,
            context: None,
            modifiers: ModifiersState::empty(),
            mouse_position: None,
            left_mouse_down: false,
            damage: Damage::Full,
            reveal_on_start,
        }
    }

    fn init_renderer(&mut self, window: Rc<Window>, context: &Context<Rc<Window>>) -> Result<()> {
        let scale_factor = window.scale_factor() as f32;
        let font = CodeFont::from_bytes(&self.font.data, self.font.size * scale_factor)?;
        let renderer = Renderer::new(Rc::clone(&window), context, font, self.theme.colors.clone())?;

        self.area.set_font_metrics(renderer.font());
        let size = window.inner_size();
        self.dispatch(resize_msg(size.width, size.height));
        if self.reveal_on_start {
            self.dispatch(Msg::Editor(EditorMsg::RevealCaret));
        }

        self.renderer = Some(renderer);
        self.damage = Damage::Full;
        Ok(())
    }

    /// Run a message through the update loop and record its effects
    fn dispatch(&mut self, msg: Msg) -> bool {
        let Some(cmd) = update(&mut self.area, &mut self.handler, msg) else {
            return false;
        };
        self.process_cmd(cmd)
    }

    fn process_cmd(&mut self, cmd: Cmd) -> bool {
        if let Some(err) = cmd.error() {
            tracing::warn!("Edit failed: {}", err);
        }
        self.damage.merge(cmd.damage());
        cmd.needs_redraw()
    }

    fn update_cursor_icon(&self, x: f64, y: f64) {
        let Some(window) = &self.window else { return };
        let geometry = self.area.geometry();
        let icon = match mapper::zone_at(&geometry, x as i32, y as i32) {
            Zone::CodeArea => CursorIcon::Text,
            _ => CursorIcon::Default,
        };
        window.set_cursor(icon);
    }

    fn handle_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
                self.dispatch(resize_msg(size.width, size.height))
            }
            WindowEvent::ModifiersChanged(mods) => {
                self.modifiers = mods.state();
                false
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return false;
                }
                match key_to_msg(&event.logical_key, self.modifiers, self.area.view_mode()) {
                    Some(msg) => self.dispatch(msg),
                    None => false,
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.render() {
                    tracing::error!("Render error: {}", e);
                }
                false
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_position = Some((position.x, position.y));
                self.update_cursor_icon(position.x, position.y);
                if self.left_mouse_down {
                    return self.dispatch(Msg::Editor(EditorMsg::Drag {
                        x: position.x as i32,
                        y: position.y as i32,
                    }));
                }
                false
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.left_mouse_down = *state == ElementState::Pressed;
                match (self.left_mouse_down, self.mouse_position) {
                    (true, Some((x, y))) => self.dispatch(Msg::Editor(EditorMsg::Click {
                        x: x as i32,
                        y: y as i32,
                        extend: self.modifiers.shift_key(),
                    })),
                    _ => false,
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y.round() as i32,
                    MouseScrollDelta::PixelDelta(pos) => {
                        let row_height = self.area.geometry().row_height().max(1) as f64;
                        -(pos.y / row_height).round() as i32
                    }
                };
                if notches == 0 {
                    return false;
                }
                self.dispatch(Msg::Editor(EditorMsg::Wheel(notches)))
            }
            _ => false,
        }
    }

    fn render(&mut self) -> Result<()> {
        let damage = std::mem::take(&mut self.damage);
        if let Some(renderer) = &mut self.renderer {
            renderer.render(&self.area, &damage)?;
        }
        Ok(())
    }

    /// Fire the blink tick when due and return the next deadline
    fn tick(&mut self, now: Instant) -> (bool, Option<Instant>) {
        let due = self
            .area
            .next_blink_deadline()
            .is_some_and(|deadline| deadline <= now);
        let redraw = due && self.dispatch(Msg::Ui(UiMsg::BlinkCursor));
        (redraw, self.area.next_blink_deadline())
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let window_attributes = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(800, 600));

        let result = event_loop
            .create_window(window_attributes)
            .map_err(anyhow::Error::from)
            .and_then(|window| {
                let window = Rc::new(window);
                let context = Context::new(Rc::clone(&window))
                    .map_err(|e| anyhow::anyhow!("Failed to create context: {}", e))?;
                Ok((window, context))
            })
            .and_then(|(window, context)| {
                self.init_renderer(Rc::clone(&window), &context)?;
                Ok((window, context))
            });

        match result {
            Ok((window, context)) => {
                self.window = Some(window);
                self.context = Some(context);
                self.request_redraw();
            }
            Err(e) => {
                tracing::error!("Failed to open window: {:#}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            self.area.shutdown();
            event_loop.exit();
            return;
        }
        let ours = self.window.as_ref().is_some_and(|w| w.id() == window_id);
        if ours && self.handle_event(&event) {
            self.request_redraw();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let (redraw, next_deadline) = self.tick(Instant::now());
        if redraw {
            self.request_redraw();
        }
        match next_deadline {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}
