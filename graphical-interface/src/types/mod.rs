mod airport;
pub use airport::Airport;

mod flight_status;
pub use flight_status::FlightStatus;

mod flight;
pub use flight::{
    delay_badge, format_delay, Endpoint, FlightRecord, SharedFlight, Telemetry, IN_FLIGHT,
};

mod input_error;
pub use input_error::{validate_flight_number, InputError};

mod live_data;
pub use live_data::LiveData;
