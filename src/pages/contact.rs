use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Stylize;

use crate::contact::{ContactForm, Field, SubmitOutcome};
use crate::content::{CONTACT_DETAILS, SOCIAL_LINKS};
use crate::cursor::hyperlink;
use crate::error::PageResult;
use crate::geometry::Size;
use crate::router::PageId;
use crate::runtime::EventFlow;
use crate::timer::TimerKey;

use super::{Page, PageContext, PageView, action};

pub const SUBMIT_TIMER: TimerKey = "contact.submit";
pub const NOTICE_TIMER: TimerKey = "contact.notice";

/// Delays for the simulated submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactTimings {
    pub submit_delay: Duration,
    pub notice_ttl: Duration,
}

impl Default for ContactTimings {
    fn default() -> Self {
        Self {
            submit_delay: Duration::from_millis(1500),
            notice_ttl: Duration::from_millis(5000),
        }
    }
}

/// Contact details, social links and the message form.
pub struct ContactPage {
    form: ContactForm,
    timings: ContactTimings,
}

impl ContactPage {
    pub fn new(timings: ContactTimings) -> Self {
        Self {
            form: ContactForm::new(),
            timings,
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    fn submit(&mut self, ctx: &mut PageContext<'_>) {
        if self.form.submit() == SubmitOutcome::Accepted {
            ctx.schedule(SUBMIT_TIMER, self.timings.submit_delay);
        }
    }

    fn push_field(&self, view: &mut PageView, field: Field) {
        let focused = self.form.focus() == Some(field);
        let marker = if focused { "›".yellow().to_string() } else { " ".to_string() };
        let label = if focused {
            field.label().bold().to_string()
        } else {
            field.label().to_string()
        };
        let mut value = self.form.fields().get(field).to_string();
        if focused {
            value.push('█');
        }
        view.line(format!("{marker} {label}: {value}"));
        if let Some(error) = self.form.errors().get(field) {
            view.line(format!("    {}", error.message(field).red()));
        }
    }
}

impl Default for ContactPage {
    fn default() -> Self {
        Self::new(ContactTimings::default())
    }
}

impl Page for ContactPage {
    fn id(&self) -> PageId {
        PageId::Contact
    }

    fn render(&self, _area: Size) -> PageResult<PageView> {
        let mut view = PageView::new();
        view.title("Dame un toque!").line(
            "Siempre estoy disponible para nuevos proyectos, ideas creativas o oportunidades \
             para ser parte de tu vision.",
        );

        view.heading("Vias de comunicacion")
            .line("Se libre de redactar un correo o escribirme por mis redes sociales.");
        for detail in CONTACT_DETAILS {
            view.line(format!("  {} {}", detail.icon, detail.text));
        }

        view.heading("Conecta conmigo");
        for link in SOCIAL_LINKS {
            view.line(format!("  {}", hyperlink(link.url, link.name)));
        }

        view.heading("Envia un mensaje");
        if let Some(notice) = self.form.notice() {
            view.line(notice.green().bold().to_string());
        }
        for field in Field::ALL {
            self.push_field(&mut view, field);
        }
        view.blank();
        if self.form.is_submitting() {
            view.line("Enviando...".italic().to_string());
        } else {
            view.line(action("Enter", "Enviar Mensaje"));
        }
        view.line(
            "Tab next field · Shift-Tab previous · Esc stop editing"
                .dark_grey()
                .to_string(),
        );
        Ok(view)
    }

    fn handle_key(&mut self, ctx: &mut PageContext<'_>, key: &KeyEvent) -> PageResult<EventFlow> {
        if key.kind != KeyEventKind::Press {
            return Ok(EventFlow::Continue);
        }
        let editing = self.form.focus().is_some();
        match key.code {
            KeyCode::Tab => {
                self.form.focus_next();
                Ok(EventFlow::Consumed)
            }
            KeyCode::BackTab => {
                self.form.focus_previous();
                Ok(EventFlow::Consumed)
            }
            KeyCode::Esc if editing => {
                self.form.set_focus(None);
                Ok(EventFlow::Consumed)
            }
            KeyCode::Enter => {
                self.submit(ctx);
                Ok(EventFlow::Consumed)
            }
            KeyCode::Backspace if editing => {
                self.form.delete_char();
                Ok(EventFlow::Consumed)
            }
            KeyCode::Char(ch)
                if editing
                    && !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.form.insert_char(ch);
                Ok(EventFlow::Consumed)
            }
            _ => Ok(EventFlow::Continue),
        }
    }

    fn on_timer(&mut self, ctx: &mut PageContext<'_>, key: TimerKey) -> PageResult<()> {
        match key {
            SUBMIT_TIMER => {
                if self.form.complete_submission() {
                    ctx.cancel(NOTICE_TIMER);
                    ctx.schedule(NOTICE_TIMER, self.timings.notice_ttl);
                }
            }
            NOTICE_TIMER => self.form.clear_notice(),
            _ => {}
        }
        Ok(())
    }
}
