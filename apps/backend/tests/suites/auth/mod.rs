mod rejections;
mod session_flow;
