//! Canvas renderer seam. Games draw through [`Surface`]; the browser build
//! implements it for `CanvasRenderingContext2d`, tests use a recorder.

use web_sys::CanvasRenderingContext2d;

pub trait Surface {
    fn clear(&mut self, w: f64, h: f64);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str);
    fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: &str);
    fn stroke_circle(&mut self, cx: f64, cy: f64, r: f64, color: &str);
    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: &str, width: f64);
    fn text(&mut self, text: &str, x: f64, y: f64, font: &str, color: &str);
}

impl Surface for CanvasRenderingContext2d {
    fn clear(&mut self, w: f64, h: f64) {
        self.clear_rect(0.0, 0.0, w, h);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str) {
        self.set_fill_style_str(color);
        CanvasRenderingContext2d::fill_rect(self, x, y, w, h);
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: &str) {
        self.begin_path();
        self.arc(cx, cy, r, 0.0, std::f64::consts::TAU).ok();
        self.set_fill_style_str(color);
        self.fill();
    }

    fn stroke_circle(&mut self, cx: f64, cy: f64, r: f64, color: &str) {
        self.begin_path();
        self.arc(cx, cy, r, 0.0, std::f64::consts::TAU).ok();
        self.set_stroke_style_str(color);
        self.stroke();
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: &str, width: f64) {
        self.begin_path();
        self.move_to(x1, y1);
        self.line_to(x2, y2);
        self.set_stroke_style_str(color);
        self.set_line_width(width);
        self.stroke();
        self.set_line_width(1.0);
    }

    fn text(&mut self, text: &str, x: f64, y: f64, font: &str, color: &str) {
        self.set_fill_style_str(color);
        self.set_font(font);
        self.fill_text(text, x, y).ok();
    }
}

/// Records draw calls as strings; used by tests to assert what a frame drew.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct Recorder {
    pub ops: Vec<String>,
}

#[cfg(test)]
impl Surface for Recorder {
    fn clear(&mut self, w: f64, h: f64) {
        self.ops.push(format!("clear {w}x{h}"));
    }
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str) {
        self.ops.push(format!("rect {x},{y} {w}x{h} {color}"));
    }
    fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: &str) {
        self.ops.push(format!("circle {cx},{cy} r{r} {color}"));
    }
    fn stroke_circle(&mut self, cx: f64, cy: f64, r: f64, color: &str) {
        self.ops.push(format!("ring {cx},{cy} r{r} {color}"));
    }
    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: &str, _width: f64) {
        self.ops.push(format!("line {x1},{y1}->{x2},{y2} {color}"));
    }
    fn text(&mut self, text: &str, _x: f64, _y: f64, _font: &str, _color: &str) {
        self.ops.push(format!("text {text}"));
    }
}
