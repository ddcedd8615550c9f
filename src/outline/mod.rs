// src/outline/mod.rs
// =============================================================================
// This module prints the element outline of an HTML document:
//
//   <html>
//     <head>
//     </head>
//     <body>
//     ...
//
// The walk itself is generic: a Visitor gets an enter() call before an
// element's children and a leave() call after them, each tagged with the
// element's depth. The outline printer is just one visitor.
//
// Submodules:
// - walk: the Visitor trait and the stack-driven walker
// =============================================================================

mod walk;

pub use walk::{walk, Visitor};

use std::fmt::Write;

use scraper::{ElementRef, Html};

/// Visitor that renders `<tag>`/`</tag>` lines indented by depth.
#[derive(Debug)]
pub struct OutlinePrinter {
    indent: usize,
    out: String,
}

impl OutlinePrinter {
    // Creates a printer using `indent` spaces per depth level
    pub fn new(indent: usize) -> Self {
        Self {
            indent,
            out: String::new(),
        }
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn line(&mut self, depth: usize, closing: bool, name: &str) {
        let slash = if closing { "/" } else { "" };
        // Writing into a String cannot fail
        let _ = writeln!(
            self.out,
            "{:width$}<{}{}>",
            "",
            slash,
            name,
            width = depth * self.indent
        );
    }
}

impl Default for OutlinePrinter {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Visitor for OutlinePrinter {
    fn enter(&mut self, element: ElementRef<'_>, depth: usize) {
        self.line(depth, false, element.value().name());
    }

    fn leave(&mut self, element: ElementRef<'_>, depth: usize) {
        self.line(depth, true, element.value().name());
    }
}

// Parses `html` and returns its outline, two spaces per level
//
// The HTML parser never fails; broken markup is repaired the way a browser
// would, so the outline always starts at <html>.
pub fn render_outline(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut printer = OutlinePrinter::default();
    walk(document.root_element(), &mut printer);
    printer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_outline_nests_elements() {
        let html = "<html><head><title>t</title></head><body><p>hi <b>there</b></p></body></html>";
        let expected = "\
<html>
  <head>
    <title>
    </title>
  </head>
  <body>
    <p>
      <b>
      </b>
    </p>
  </body>
</html>
";
        assert_eq!(render_outline(html), expected);
    }

    #[test]
    fn test_render_outline_repairs_fragments() {
        let outline = render_outline("<p>loose");
        assert!(outline.starts_with("<html>\n  <head>\n  </head>\n  <body>\n    <p>\n"));
        assert!(outline.ends_with("</html>\n"));
    }

    #[test]
    fn test_default_printer_indents_two_spaces() {
        let document = Html::parse_document("<p>x</p>");
        let mut printer = OutlinePrinter::default();
        walk(document.root_element(), &mut printer);
        assert!(printer.finish().contains("\n    <p>\n"));
    }

    #[test]
    fn test_custom_indent() {
        let document = Html::parse_document("<p>x</p>");
        let mut printer = OutlinePrinter::new(4);
        walk(document.root_element(), &mut printer);
        assert!(printer.finish().contains("\n        <p>\n"));
    }
}
