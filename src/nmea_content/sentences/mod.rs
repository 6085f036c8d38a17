mod ack;
mod alr;
mod dbt;
mod dpt;
mod gga;
mod gll;
mod gsa;
mod gsv;
mod hdt;
mod mwv;
mod rmc;
mod txt;
mod vdm;
mod vtg;
mod zda;

pub use ack::ACK;
pub use alr::ALR;
pub use dbt::DBT;
pub use dpt::DPT;
pub use gga::GGA;
pub use gll::GLL;
pub use gsa::GSA;
pub use gsv::GSV;
pub use hdt::HDT;
pub use mwv::MWV;
pub use rmc::RMC;
pub use txt::TXT;
pub use vdm::{AisFragment, VDM, VDO};
pub use vtg::VTG;
pub use zda::ZDA;
