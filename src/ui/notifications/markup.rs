// SPDX-License-Identifier: MPL-2.0
//! Toast body markup.
//!
//! Message bodies may carry a small markup subset: text, `<br />` line
//! breaks and `<button class="...">label</button>` controls. Other tags
//! are ignored but their text is kept. A body that does not parse is
//! shown verbatim.

use crate::dom::Button;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// One piece of a toast body, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    LineBreak,
    /// Index into the toast's control list.
    Control(usize),
}

/// Display structure of a toast body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body {
    segments: Vec<Segment>,
}

impl Body {
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Plain-text rendering, controls omitted.
    #[must_use]
    pub fn text(&self) -> String {
        let mut text = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(t) => text.push_str(t),
                Segment::LineBreak => text.push('\n'),
                Segment::Control(_) => {}
            }
        }
        text
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Segment::Text(last)) = self.segments.last_mut() {
            last.push_str(text);
        } else {
            self.segments.push(Segment::Text(text.to_string()));
        }
    }
}

/// A parsed body together with the controls it declares.
#[derive(Debug, Clone, Default)]
pub struct Parsed {
    body: Body,
    controls: Vec<Button>,
}

impl Parsed {
    fn plain(message: &str) -> Self {
        let mut body = Body::default();
        body.push_text(message);
        Self {
            body,
            controls: Vec::new(),
        }
    }

    #[must_use]
    pub fn into_parts(self) -> (Body, Vec<Button>) {
        (self.body, self.controls)
    }
}

/// Parses a message body, falling back to plain text.
#[must_use]
pub fn parse(message: &str) -> Parsed {
    if !message.contains(['<', '&']) {
        return Parsed::plain(message);
    }
    match parse_markup(message) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::debug!(%err, "toast body is not valid markup, showing it as text");
            Parsed::plain(message)
        }
    }
}

#[derive(Debug)]
struct PendingControl {
    class: String,
    label: String,
}

fn parse_markup(message: &str) -> Result<Parsed, quick_xml::Error> {
    let wrapped = format!("<toast>{message}</toast>");
    let mut reader = Reader::from_str(&wrapped);
    reader.config_mut().trim_text(false);

    let mut parsed = Parsed::default();
    let mut pending: Option<PendingControl> = None;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) if is_tag(e, b"button") => {
                pending = Some(PendingControl {
                    class: class_of(e),
                    label: String::new(),
                });
            }
            Event::End(ref e) if e.name().as_ref() == b"button" => {
                if let Some(control) = pending.take() {
                    parsed.push_control(control.label.trim(), &control.class);
                }
            }
            Event::Empty(ref e) if is_tag(e, b"br") => {
                parsed.body.segments.push(Segment::LineBreak);
            }
            Event::Empty(ref e) if is_tag(e, b"button") => {
                parsed.push_control("", &class_of(e));
            }
            Event::Text(ref e) => {
                let text = e.unescape()?;
                match pending.as_mut() {
                    Some(control) => control.label.push_str(&text),
                    None => parsed.body.push_text(&text),
                }
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                parsed.body.push_text(&text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(parsed)
}

impl Parsed {
    fn push_control(&mut self, label: &str, class: &str) {
        self.body
            .segments
            .push(Segment::Control(self.controls.len()));
        self.controls.push(Button::new(label, class));
    }
}

fn is_tag(start: &BytesStart<'_>, name: &[u8]) -> bool {
    start.name().as_ref() == name
}

fn class_of(start: &BytesStart<'_>) -> String {
    start
        .attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"class")
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::CONFIRM_MARKUP;

    #[test]
    fn plain_message_is_single_text_segment() {
        let (body, controls) = parse("File saved").into_parts();
        assert_eq!(body.segments(), &[Segment::Text("File saved".into())]);
        assert!(controls.is_empty());
    }

    #[test]
    fn confirm_markup_yields_two_controls() {
        let message = format!("Delete item?{CONFIRM_MARKUP}");
        let (body, controls) = parse(&message).into_parts();

        assert_eq!(
            body.segments(),
            &[
                Segment::Text("Delete item?".into()),
                Segment::LineBreak,
                Segment::LineBreak,
                Segment::Control(0),
                Segment::Text(" ".into()),
                Segment::Control(1),
            ]
        );
        assert_eq!(controls.len(), 2);
        assert!(controls[0].matches(".btn.confirm-yes"));
        assert_eq!(controls[0].label(), "Yes");
        assert!(controls[1].matches(".btn.confirm-no"));
        assert_eq!(controls[1].label(), "No");
    }

    #[test]
    fn entities_are_unescaped() {
        let (body, _) = parse("Tom &amp; Jerry").into_parts();
        assert_eq!(body.text(), "Tom & Jerry");
    }

    #[test]
    fn unknown_tags_keep_their_text() {
        let (body, _) = parse("Saved <b>report.pdf</b><br/>to disk").into_parts();
        assert_eq!(body.text(), "Saved report.pdf\nto disk");
    }

    #[test]
    fn malformed_markup_falls_back_to_plain_text() {
        let message = "Pick one <button class=\"btn\">unclosed";
        let (body, controls) = parse(message).into_parts();
        assert_eq!(body.segments(), &[Segment::Text(message.into())]);
        assert!(controls.is_empty());
    }
}
