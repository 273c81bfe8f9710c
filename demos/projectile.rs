use dimdiff::prelude::*;

fn main() -> dimdiff::Result<()> {
    // Range of a projectile launched from flat ground: R = v^2 sin(2θ) / g.
    let speed = variable("v", Quantity::new(25.0, METRE_PER_SECOND));
    let angle = variable("theta", Quantity::new(35.0_f64.to_radians(), RADIAN));

    let lift = (&angle * 2.0)?.sin()?;
    let range = ((speed.powi(2)? * &lift)? / &STANDARD_GRAVITY)?;

    let grads = differentiate(&range, [&speed, &angle])?;

    println!("{range}");
    println!("R         = {}", range.value().to(&METRE)?);
    println!("dR/dv     = {}", grads[&speed]);
    println!("dR/dtheta = {}", grads[&angle]);

    // Sweep the launch angle; the gradient changes sign at 45 degrees.
    for degrees in [15.0_f64, 30.0, 45.0, 60.0, 75.0] {
        let theta = variable("theta", Quantity::new(degrees.to_radians(), RADIAN));
        let r = (((&theta * 2.0)?.sin()? * speed.value().powi(2)?)? / &STANDARD_GRAVITY)?;
        let g = differentiate(&r, [&theta])?;
        println!("{degrees:>4} deg: R = {:>8.3} m, dR/dtheta = {}", r.scalar().unwrap_or(f64::NAN), g[&theta]);
    }
    Ok(())
}
