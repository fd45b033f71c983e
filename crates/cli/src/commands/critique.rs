//! `brushwise critique` — Practice-studio feedback for an image.

use brushwise_core::Critic;

pub async fn run(image_url: String) -> Result<(), Box<dyn std::error::Error>> {
    let critic = Critic::new();
    let critique = critic.critique(Some(&image_url))?;

    println!("{}", critique.feedback);

    if critique.variations_offered {
        println!();
        println!("  Ideas to iterate on:");
        for idea in critic.iterations() {
            println!("   • {idea}");
        }
    }

    Ok(())
}
