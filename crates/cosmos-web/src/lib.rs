pub mod runner;

pub use runner::{entropy_seed, ViewRunner};

#[doc(hidden)]
pub use cosmos_engine as engine;

/// Generate all `#[wasm_bindgen]` exports for a view.
///
/// Generates:
/// - `thread_local!` storage for the ViewRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (view_init, view_tick, pointer/resize/custom
///   input, JSON and buffer accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod explorer;
/// use explorer::Explorer;
///
/// cosmos_web::export_view!(Explorer, "explorer");
/// ```
///
/// # Arguments
///
/// - `$view_type`: The view struct type that implements `cosmos_engine::View`
/// - `$view_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_view {
    ($view_type:ty, $view_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::ViewRunner<$view_type>>> = RefCell::new(None);
        }

        /// Run `f` against the runner; before `view_init` this logs and
        /// returns the default value instead.
        fn with_runner<R: Default>(f: impl FnOnce(&mut $crate::ViewRunner<$view_type>) -> R) -> R {
            RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
                Some(runner) => f(runner),
                None => {
                    log::warn!("{}: call view_init() first", $view_name);
                    R::default()
                }
            })
        }

        #[wasm_bindgen]
        pub fn view_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let view = <$view_type>::new();
            let runner = $crate::ViewRunner::new(view, $crate::entropy_seed());

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $view_name);
        }

        #[wasm_bindgen]
        pub fn view_tick() {
            with_runner(|r| r.tick());
        }

        #[wasm_bindgen]
        pub fn view_pointer_down(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::engine::InputEvent::PointerDown { x, y }));
        }

        #[wasm_bindgen]
        pub fn view_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::engine::InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn view_pointer_leave() {
            with_runner(|r| r.push_input($crate::engine::InputEvent::PointerLeave));
        }

        #[wasm_bindgen]
        pub fn view_resize(width: f32, height: f32, pixel_ratio: f32) {
            with_runner(|r| {
                r.push_input($crate::engine::InputEvent::Resize { width, height, pixel_ratio })
            });
        }

        #[wasm_bindgen]
        pub fn view_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input($crate::engine::InputEvent::Custom { kind, a, b, c }));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_frame_ready() -> bool {
            with_runner(|r| r.frame_ready())
        }

        #[wasm_bindgen]
        pub fn get_frame_json() -> String {
            with_runner(|r| r.frame_json())
        }

        #[wasm_bindgen]
        pub fn get_labels_json() -> String {
            with_runner(|r| r.labels_json())
        }

        #[wasm_bindgen]
        pub fn get_events_json() -> String {
            with_runner(|r| r.events_json())
        }

        #[wasm_bindgen]
        pub fn get_events_len() -> u32 {
            with_runner(|r| r.events_len())
        }

        /// Canvas backing-store width in device pixels.
        #[wasm_bindgen]
        pub fn get_backing_width() -> u32 {
            with_runner(|r| r.backing_size().0)
        }

        #[wasm_bindgen]
        pub fn get_backing_height() -> u32 {
            with_runner(|r| r.backing_size().1)
        }

        #[wasm_bindgen]
        pub fn get_cursor() -> String {
            with_runner(|r| r.cursor().to_owned())
        }

        #[wasm_bindgen]
        pub fn get_snapshot_json() -> String {
            with_runner(|r| r.snapshot_json())
        }
    };

    // Variant with vectors feature
    ($view_type:ty, $view_name:literal, vectors) => {
        $crate::export_view!($view_type, $view_name);

        // ---- Vector accessors (only when vectors feature is enabled) ----

        #[wasm_bindgen]
        pub fn get_vector_vertices_ptr() -> *const f32 {
            RUNNER.with(|cell| {
                cell.borrow()
                    .as_ref()
                    .map_or(std::ptr::null(), |r| r.vector_vertices_ptr())
            })
        }

        #[wasm_bindgen]
        pub fn get_vector_vertex_count() -> u32 {
            with_runner(|r| r.vector_vertex_count())
        }

        #[wasm_bindgen]
        pub fn get_max_vector_vertices() -> u32 {
            with_runner(|r| r.max_vector_vertices())
        }
    };
}
