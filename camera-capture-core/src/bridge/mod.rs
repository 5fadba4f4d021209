pub mod capture_bridge;
