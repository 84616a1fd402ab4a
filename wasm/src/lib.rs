use fskwave_core::{CodecParams, Demodulator, Mode, Modulator};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmCodec {
    modulator: Modulator,
    demodulator: Demodulator,
}

#[wasm_bindgen]
impl WasmCodec {
    /// Build a codec; `mode` is "bit" or "byte"
    #[wasm_bindgen(constructor)]
    pub fn new(
        mode: &str,
        freq0: f32,
        freq1: f32,
        duration: f64,
        sample_rate: u32,
    ) -> Result<WasmCodec, JsValue> {
        let mode: Mode = mode.parse().map_err(to_js)?;
        let params = CodecParams::new(freq0, freq1, duration, sample_rate).map_err(to_js)?;
        // Browsers have no scoped threads; everything runs on the calling thread
        Ok(WasmCodec {
            modulator: Modulator::new(params, mode).with_workers(1),
            demodulator: Demodulator::new(params, mode).with_workers(1),
        })
    }

    /// Encode binary data into audio samples
    /// Takes a Uint8Array and returns Float32Array of audio samples
    #[wasm_bindgen]
    pub fn encode(&self, data: &[u8]) -> Result<Vec<f32>, JsValue> {
        self.modulator.modulate(data).map_err(to_js)
    }

    /// Decode audio samples back to binary data
    /// Takes a Float32Array and returns Uint8Array of decoded data
    #[wasm_bindgen]
    pub fn decode(&self, samples: &[f32]) -> Result<Vec<u8>, JsValue> {
        self.demodulator.demodulate(samples).map_err(to_js)
    }

    #[wasm_bindgen(getter, js_name = samplesPerSymbol)]
    pub fn samples_per_symbol(&self) -> usize {
        self.modulator.params().slot_length()
    }
}

fn to_js(e: fskwave_core::FskError) -> JsValue {
    JsValue::from_str(&e.to_string())
}
