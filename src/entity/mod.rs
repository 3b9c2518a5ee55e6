mod decision;

pub use decision::Decision;
