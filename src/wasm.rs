//! WebAssembly bindings for the simulator.
//!
//! A browser view owns a [`WasmSimulator`], forwards button presses to it and
//! redraws from [`WasmSimulator::snapshot_json`].

use wasm_bindgen::prelude::*;
use crate::{Mode, ShiftRegisterSimulator, Transition, parse_script};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn js_err(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

/// JavaScript-friendly simulator wrapper.
#[wasm_bindgen]
pub struct WasmSimulator {
    sim: ShiftRegisterSimulator,
}

#[wasm_bindgen]
impl WasmSimulator {
    /// Create a simulator, e.g. `new WasmSimulator("piso", 4)`.
    #[wasm_bindgen(constructor)]
    pub fn new(mode: &str, width: usize) -> Result<WasmSimulator, JsError> {
        let mode: Mode = mode.parse().map_err(js_err)?;
        let sim = ShiftRegisterSimulator::new(mode, width).map_err(js_err)?;
        Ok(Self { sim })
    }

    /// Queue a serial input string and clear the register.
    #[wasm_bindgen]
    pub fn load_serial(&mut self, bits: &str) -> Result<(), JsError> {
        self.sim.set_serial_string(bits).map_err(js_err)
    }

    /// Set one parallel input line.
    #[wasm_bindgen]
    pub fn set_parallel_bit(&mut self, index: usize, value: u8) -> Result<(), JsError> {
        self.sim.set_parallel_bit(index, value).map_err(js_err)
    }

    /// Set the PISO serial input line.
    #[wasm_bindgen]
    pub fn set_serial_bit(&mut self, value: u8) -> Result<(), JsError> {
        self.sim.set_serial_bit(value).map_err(js_err)
    }

    /// Apply one clock pulse. Returns the bit that left QN, or -1 for a
    /// parallel load.
    #[wasm_bindgen]
    pub fn pulse(&mut self) -> i32 {
        match self.sim.pulse() {
            Transition::Shifted { outgoing, .. } => outgoing.to_u8() as i32,
            Transition::Loaded { .. } => -1,
        }
    }

    /// Register contents, Q1 first.
    #[wasm_bindgen]
    pub fn register(&self) -> Vec<u8> {
        self.sim.register().to_u8s()
    }

    /// Diagram labels (`Q1=0`, `D1=1`, `OUT=0`, ...).
    #[wasm_bindgen]
    pub fn labels(&self) -> js_sys::Array {
        self.sim
            .snapshot()
            .labels()
            .into_iter()
            .map(JsValue::from)
            .collect()
    }

    /// Full snapshot as a JSON string.
    #[wasm_bindgen]
    pub fn snapshot_json(&self) -> String {
        self.sim.snapshot().to_json()
    }

    /// Clock pulses applied so far.
    #[wasm_bindgen]
    pub fn pulses(&self) -> u32 {
        self.sim.pulses() as u32
    }
}

/// Run a stimulus script and return every recorded event as JSON.
#[wasm_bindgen]
pub fn wasm_run_script(source: &str) -> Result<String, JsError> {
    let script = parse_script(source).map_err(js_err)?;
    let (_, events) = script.run().map_err(js_err)?;
    serde_json::to_string(&events).map_err(js_err)
}
