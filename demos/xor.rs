use momentum_nn::data::xor_table;
use momentum_nn::format::format_labeled;
use momentum_nn::{train_epochs, NetConfig, Network};

fn main() -> momentum_nn::Result<()> {
    env_logger::init();

    let mut network = Network::seeded(&[2, 2, 1], NetConfig::default(), 2019)?;
    let (inputs, expected_outputs) = xor_table();

    let epochs = 5000;
    for epoch in 0..epochs / 500 {
        let error = train_epochs(&mut network, &inputs, &expected_outputs, 500)?;
        println!("Epoch {}: recent avg error = {error:.6}", (epoch + 1) * 500);
    }

    for input in &inputs {
        network.forward(input)?;
        println!("{}  ::  {}", format_labeled("IN:", input), format_labeled("OUT:", &network.results()));
    }
    Ok(())
}
