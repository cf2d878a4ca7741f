//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a subsystem end to end
//! against simulated sensors, a manual clock and a recording motor. All
//! tests run on the host with no real hardware required.

mod mock_hw;
mod protection_tests;
mod trigger_tests;
