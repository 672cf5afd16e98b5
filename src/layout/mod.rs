mod renderer;

pub use renderer::PostLayout;
