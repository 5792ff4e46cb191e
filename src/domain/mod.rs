// Domain layer: entities, typed input rows and ports (interfaces).

pub mod model;
pub mod ports;
pub mod records;
