use cosmos_engine::{Frame, InputEvent, InputQueue, View, ViewConfig, ViewContext};
#[cfg(feature = "vectors")]
use cosmos_engine::Tessellator;

/// Generic view runner that wires a `View` to the host tick loop.
///
/// Each concrete front end keeps one runner in a `thread_local!` and exports
/// free functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct ViewRunner<V: View> {
    view: V,
    ctx: ViewContext,
    input: InputQueue,
    config: ViewConfig,
    initialized: bool,
    /// Last produced frame, kept so the host can re-read it after a skip.
    frame: Option<Frame>,
    frame_ready: bool,
    #[cfg(feature = "vectors")]
    tessellator: Tessellator,
}

impl<V: View> ViewRunner<V> {
    pub fn new(view: V, seed: u64) -> Self {
        let config = view.config();
        Self {
            #[cfg(feature = "vectors")]
            tessellator: Tessellator::new(config.max_vector_vertices),
            view,
            ctx: ViewContext::new(seed),
            input: InputQueue::new(),
            config,
            initialized: false,
            frame: None,
            frame_ready: false,
        }
    }

    /// Initialize the view. Call once after construction.
    pub fn init(&mut self) {
        self.config = self.view.config();
        #[cfg(feature = "vectors")]
        {
            self.tessellator = Tessellator::new(self.config.max_vector_vertices);
        }
        self.view.init(&mut self.ctx);
        self.initialized = true;
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one tick: handle queued input, then ask the view for a frame.
    pub fn tick(&mut self) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();
        self.view.update(&mut self.ctx, &self.input);
        self.input.drain();

        match self.view.render(&mut self.ctx) {
            Some(frame) => {
                #[cfg(feature = "vectors")]
                self.tessellator.tessellate(&frame);
                self.frame = Some(frame);
                self.frame_ready = true;
            }
            None => self.frame_ready = false,
        }
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// True when the last tick produced a new frame.
    pub fn frame_ready(&self) -> bool {
        self.frame_ready
    }

    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    /// Full draw list of the last frame, for hosts that replay on a 2D canvas.
    pub fn frame_json(&self) -> String {
        match &self.frame {
            Some(frame) => to_json(serde_json::to_string(frame), "null", "frame"),
            None => "null".to_owned(),
        }
    }

    /// Text commands of the last frame; the host draws these itself.
    pub fn labels_json(&self) -> String {
        match &self.frame {
            Some(frame) => to_json(serde_json::to_string(&frame.texts()), "[]", "labels"),
            None => "[]".to_owned(),
        }
    }

    /// Backing-store size of the last frame in device pixels; the host sizes
    /// the canvas to this before drawing. `(0, 0)` until a frame exists.
    pub fn backing_size(&self) -> (u32, u32) {
        self.frame.as_ref().map_or((0, 0), |f| f.size.backing_size())
    }

    /// Selection events raised during the last tick.
    pub fn events_json(&self) -> String {
        to_json(serde_json::to_string(&self.ctx.events), "[]", "events")
    }

    pub fn events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    /// CSS cursor for the canvas.
    pub fn cursor(&self) -> &'static str {
        self.ctx.cursor.css()
    }

    pub fn snapshot_json(&self) -> String {
        to_json(serde_json::to_string(&self.view.snapshot()), "{}", "snapshot")
    }

    // ---- Vector buffer accessors ----

    #[cfg(feature = "vectors")]
    pub fn vector_vertices_ptr(&self) -> *const f32 {
        self.tessellator.buffer_ptr()
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertex_count(&self) -> u32 {
        self.tessellator.vertex_count() as u32
    }

    #[cfg(feature = "vectors")]
    pub fn max_vector_vertices(&self) -> u32 {
        self.tessellator.max_vertices() as u32
    }
}

/// Unwrap a serialisation result, logging and substituting `fallback` on failure.
fn to_json(result: serde_json::Result<String>, fallback: &str, what: &str) -> String {
    result.unwrap_or_else(|err| {
        log::error!("failed to serialise {what}: {err}");
        fallback.to_owned()
    })
}

/// A fresh 64-bit seed from the browser's `Math.random()`.
pub fn entropy_seed() -> u64 {
    let word = || (js_sys::Math::random() * u32::MAX as f64) as u64;
    (word() << 32) | word()
}
