//! Thin element writer over `quick_xml::Writer`.
//!
//! Text and attribute values are escaped by quick-xml. Void elements are
//! written self-closed (`<input/>`), which HTML parsers accept.

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::Result;

pub(crate) type Attrs<'a> = &'a [(&'a str, &'a str)];

pub(crate) struct Html {
    xml: Writer<Vec<u8>>,
}

impl Html {
    pub(crate) fn new() -> Self {
        Self {
            xml: Writer::new(Vec::new()),
        }
    }

    pub(crate) fn indented() -> Self {
        Self {
            xml: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    pub(crate) fn doctype(&mut self) -> Result<()> {
        self.xml
            .write_event(Event::DocType(BytesText::from_escaped("html")))?;
        Ok(())
    }

    pub(crate) fn open(&mut self, tag: &str, attrs: Attrs<'_>) -> Result<()> {
        let start = BytesStart::new(tag).with_attributes(attrs.iter().copied());
        self.xml.write_event(Event::Start(start))?;
        Ok(())
    }

    pub(crate) fn close(&mut self, tag: &str) -> Result<()> {
        self.xml.write_event(Event::End(BytesEnd::new(tag)))?;
        Ok(())
    }

    pub(crate) fn text(&mut self, text: &str) -> Result<()> {
        if !text.is_empty() {
            self.xml.write_event(Event::Text(BytesText::new(text)))?;
        }
        Ok(())
    }

    /// `<tag attrs>text</tag>`
    pub(crate) fn element(&mut self, tag: &str, attrs: Attrs<'_>, text: &str) -> Result<()> {
        self.open(tag, attrs)?;
        self.text(text)?;
        self.close(tag)
    }

    pub(crate) fn void(&mut self, tag: &str, attrs: Attrs<'_>) -> Result<()> {
        let start = BytesStart::new(tag).with_attributes(attrs.iter().copied());
        self.xml.write_event(Event::Empty(start))?;
        Ok(())
    }

    /// Pre-escaped markup, used for embedded stylesheets.
    pub(crate) fn raw(&mut self, markup: &str) -> Result<()> {
        self.xml
            .write_event(Event::Text(BytesText::from_escaped(markup)))?;
        Ok(())
    }

    pub(crate) fn finish(self) -> Result<String> {
        Ok(String::from_utf8(self.xml.into_inner())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_text_and_attributes() {
        let mut html = Html::new();
        html.element("a", &[("title", "\"quoted\" & <b>")], "1 < 2")
            .unwrap();
        assert_eq!(
            html.finish().unwrap(),
            "<a title=\"&quot;quoted&quot; &amp; &lt;b&gt;\">1 &lt; 2</a>"
        );
    }

    #[test]
    fn empty_elements_keep_their_end_tag() {
        let mut html = Html::new();
        html.element("div", &[("id", "results")], "").unwrap();
        html.void("input", &[("type", "search")]).unwrap();
        assert_eq!(
            html.finish().unwrap(),
            "<div id=\"results\"></div><input type=\"search\"/>"
        );
    }
}
