use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::DefaultTerminal;
use tracing::debug;

use crate::app::screen::set_screen_active;
use crate::app::{App, Model, update};
use crate::session::Session;

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop
    /// encounters an I/O failure. Save failures are shown in the UI instead.
    pub fn run(&mut self, session: Session) -> Result<()> {
        // Create image picker BEFORE initializing terminal (queries stdio)
        let picker = if self.images_enabled {
            crate::image::create_picker(self.force_half_cell)
        } else {
            None
        };

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal; qcreview requires an interactive terminal")?;
        set_screen_active(true);
        let size = match terminal.size() {
            Ok(size) => size,
            Err(err) => {
                ratatui::restore();
                set_screen_active(false);
                return Err(err.into());
            }
        };

        let mut model =
            Model::new(session, self.image_source.clone(), (size.width, size.height))
                .with_picker(picker);
        model.layout = self.layout;
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);

        // The first record counts as viewed once it is on screen.
        if let Err(err) = model.session.enter_current() {
            model.report_save_error(&err);
        }

        let result = self.event_loop(&mut terminal, &mut model);

        ratatui::restore();
        set_screen_active(false);

        result
    }

    fn event_loop(&self, terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            let poll_ms = if needs_render { 0 } else { 250 };
            if event::poll(Duration::from_millis(poll_ms))? {
                if let Some(msg) = self.handle_event(&event::read()?, model) {
                    debug!(?msg, "message");
                    *model = update(std::mem::take(model), msg);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                while event::poll(Duration::from_millis(0))? {
                    if let Some(msg) = self.handle_event(&event::read()?, model) {
                        *model = update(std::mem::take(model), msg);
                        needs_render = true;
                    }
                    if model.should_quit {
                        break;
                    }
                }
            }

            if model.should_quit {
                break;
            }

            if needs_render {
                model.prepare_image();
                terminal.draw(|frame| Self::view(model, frame))?;
                needs_render = false;
            }
        }
        Ok(())
    }
}
