pub mod cone;
pub mod sphere;

pub use cone::cone;
pub use sphere::sphere;
