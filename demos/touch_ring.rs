#![no_std]
#![no_main]

use core::convert::Infallible;

use defmt::info;
use embassy_executor::Spawner;
use touch_ring::Result;
use touch_ring::constants::{MAX_BRIGHTNESS, MAX_CURRENT_MA};
use touch_ring::hardware::Hardware;
use {defmt_rtt as _, panic_probe as _};

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(_spawner: Spawner) -> Result<Infallible> {
    let hardware = Hardware::new(embassy_rp::init(Default::default()));
    info!(
        "touch ring: {} mA budget, channel cap {}",
        MAX_CURRENT_MA, MAX_BRIGHTNESS
    );

    let (mut ticks, mut context) = hardware.into_context();
    // The ticker never runs out, so `run` only comes back with an error.
    loop {
        touch_ring::run(&mut ticks, &mut context).await?;
    }
}
