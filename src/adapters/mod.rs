//! Adapters: concrete implementations of the [`ports`](crate::ports) traits.
//!
//! | Adapter       | Port(s)                 | Backing                     |
//! |---------------|-------------------------|-----------------------------|
//! | `SystemClock` | `Clock`                 | `std::time::Instant`        |
//! | `ManualClock` | `Clock`                 | shared atomic, test/replay  |
//! | `SimAnalog`   | `AnalogSource`          | shared atomic, test/replay  |
//! | `DigitalInput`| `Condition`             | `embedded_hal` `InputPin`   |
//! | `PwmMotor`    | `Actuator`              | `embedded_hal` PWM + GPIO   |

pub mod hal;
pub mod sim;
pub mod time;
