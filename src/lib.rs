// Crate entry point. Re-export modules so tests and binaries can import them easily.
//
// Responsibilities
// - Only declare and expose modules. No business logic here.
//
// How it is used
// - Tests import modules from this crate root to reach the code under test.

pub mod core {
    pub mod entity;
    pub mod join {
        pub mod index;
    }
    pub mod metrics {
        pub mod aggregate;
        pub mod period;
    }
    pub mod ports;
    pub mod quality;
}

pub mod application {
    pub mod errors;
    pub mod snapshot_loader;
    pub mod view_models {
        pub mod dashboard;
        pub mod kanban;
        pub mod labels;
        pub mod report;
        pub mod shapes;
        pub mod time_tracking;
    }
}

pub mod adapters {
    pub mod in_memory {
        pub mod in_memory_source;
    }
    pub mod json_file {
        pub mod json_file_source;
    }
}

pub mod shell;
