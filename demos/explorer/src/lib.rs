use wasm_bindgen::prelude::*;

mod explorer;
use explorer::Explorer;

cosmos_web::export_view!(Explorer, "explorer", vectors);
