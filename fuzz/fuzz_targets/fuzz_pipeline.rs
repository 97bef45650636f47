#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // The whole pipeline must stay panic-free, not just parsing.
        if let Ok(invoice) = cfdi::parse::from_xml(s) {
            let _ = cfdi::core::validate(&invoice);
            let _ = cfdi::display::format_invoice(&invoice);
        }
    }
});
