use std::io::Write;
use std::sync::{Mutex, PoisonError};

/// Presentation mode of the search form. The only transition is
/// `Full -> Minimized`, taken on the first rendered result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Full,
    Minimized,
}

/// A clickable result entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultLink {
    pub index: usize,
    pub url: String,
    pub text: String,
}

/// Where results are drawn: the result list plus the form it belongs to.
pub trait ResultsView: Send + Sync {
    /// Remove every rendered entry.
    fn clear(&self);
    fn set_form_mode(&self, mode: FormMode);
    fn append_link(&self, link: &ResultLink);
    /// Append a plain, non-clickable entry.
    fn append_notice(&self, text: &str);
}

/// Renders results as numbered lines on a writer (stdout for the CLI).
pub struct TerminalView<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self, text: std::fmt::Arguments<'_>) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let res = out.write_fmt(text);
        if let Err(e) = res.and_then(|_| out.flush()) {
            log::debug!("terminal view write failed: {e}");
        }
    }
}

impl<W: Write + Send> ResultsView for TerminalView<W> {
    fn clear(&self) {
        self.write(format_args!("\n"));
    }

    fn set_form_mode(&self, mode: FormMode) {
        if mode == FormMode::Minimized {
            self.write(format_args!("results:\n"));
        }
    }

    fn append_link(&self, link: &ResultLink) {
        self.write(format_args!(
            "{:>3}. {}\n     {}\n",
            link.index + 1,
            link.text,
            link.url
        ));
    }

    fn append_notice(&self, text: &str) {
        self.write(format_args!("  {text}\n"));
    }
}

#[test]
fn test_terminal_view_numbers_links_from_one() {
    let view = TerminalView::new(Vec::new());
    view.clear();
    view.set_form_mode(FormMode::Minimized);
    view.append_link(&ResultLink {
        index: 0,
        url: "https://a.com".to_string(),
        text: "A...".to_string(),
    });
    view.append_notice("nothing else");

    let out = String::from_utf8(view.into_inner()).unwrap();
    assert_eq!(
        out,
        "\nresults:\n  1. A...\n     https://a.com\n  nothing else\n"
    );
}
