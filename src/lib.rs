// Crate entry point. Re-export modules so tests and binaries can import them easily.
//
// Responsibilities
// - Only declare and expose modules. No business logic here.

pub mod core {
    pub mod employee;
    pub mod ports;
    pub mod project;
    pub mod rates;
    pub mod summary;
    pub mod time_entry;
    pub mod week;
}

pub mod application {
    pub mod errors;
    pub mod summaries;
    pub mod tracker;
}

pub mod adapters {
    pub mod export;
    pub mod json_store;
    pub mod in_memory {
        pub mod in_memory_record_store;
        pub mod in_memory_summary_sink;
    }
}

pub mod shell;
