//! The shipped hook catalog.
//!
//! Every GL entry point the tracer hooks, grouped into the three bins the
//! ingester expects. `GlobalState/ContextState` carries the state vector the
//! replayer has to re-create; `Actions` are recorded but stateless;
//! `Unsupported` entries are hooked only so a capture of an application
//! using them reports itself.
//!
//! Argument tokens encode the C type and name together, `GLenum_target`
//! reading as `GLenum target` and `ptr` segments as `*`.

use crate::catalog::{Bin, Catalog, ClassDef, EntryDef};

fn e(name: &str, args: &[&str]) -> EntryDef {
    EntryDef::new(name, args)
}

/// The full catalog consumed by the driver.
pub fn catalog() -> Catalog {
    Catalog {
        global_state: Bin::default().class(context_state()),
        actions: actions(),
        unsupported: unsupported(),
    }
}

fn context_state() -> ClassDef {
    ClassDef::new("ContextState")
        // Which thread owns this context (most recent MakeCurrent while the
        // owner was null).
        .data("OwnerThread", "DWORD")
        // Texture units and the texture objects bound to them. Unless
        // sampler objects are used, a texture object also carries its
        // sampler state.
        .data("TextureUnits", "std::map<std::pair<GLuint, GLenum>, GLuint>")
        .data("TextureObjects", "std::map<GLuint, GLTexture*>")
        .data("PixelStoreState", "GLPixelStoreState")
        .data("PixelTransferState", "GLPixelTransferState")
        .data("BufferBindings", "std::map<GLenum, GLuint>")
        .data("BufferObjects", "std::map<GLuint, GLBuffer*>")
        .data("ProgramObjectsGLSL", "std::map<GLuint, GLProgram*>")
        .data("ShaderObjectsGLSL", "std::map<GLuint, GLShader*>")
        .data("ProgramBindingsARB", "std::map<GLenum, GLuint>")
        .data("ProgramObjectsARB", "std::map<GLuint, GLProgramARB*>")
        .data("EnableCap", "std::map<GLenum, GLboolean>")
        .data("TextureEnableCap", "std::map<std::pair<GLenum, GLenum>, GLboolean>")
        .data("FrameBufferBindings", "std::map<GLenum, GLuint>")
        .data("FrameBufferObjects", "std::map<GLuint, GLFrameBufferObject*>")
        .data("RenderBufferBindings", "std::map<GLenum, GLuint>")
        .data("RenderBufferObjects", "std::map<GLuint, GLRenderBufferObject*>")
        .data("ClipPlaneEquations", "std::map<GLenum, GLClipPlane>")
        // Draw and read buffer when no FBO is bound.
        .data("DrawBuffer", "GLenum")
        .data("ReadBuffer", "GLenum")
        .data("SamplerBindings", "std::map<GLuint, GLuint>")
        .data("SamplerObjects", "std::map<GLuint, GLSampler*>")
        .data("VertexAttribEnabled", "std::map<GLuint, bool>")
        .entries(core_state())
        .entries(extension_state())
}

fn core_state() -> Vec<EntryDef> {
    vec![
        e("glAccum", &["GLenum_op", "GLfloat_value"]),
        e("glAlphaFunc", &["GLenum_func", "GLclampf_ref"]),
        e("glBindTexture", &["GLenum_target", "GLuint_texture"])
            .manual_replay()
            .manual_state(),
        e("glBlendFunc", &["GLenum_sfactor", "GLenum_dfactor"]),
        e("glClearAccum", &["GLfloat_red", "GLfloat_green", "GLfloat_blue", "GLfloat_alpha"]),
        e("glClearColor", &["GLclampf_red", "GLclampf_green", "GLclampf_blue", "GLclampf_alpha"]),
        e("glClearDepth", &["GLclampd_depth"]),
        e("glClearIndex", &["GLfloat_c"]),
        e("glClearStencil", &["GLint_s"]),
        e("glClipPlane", &["GLenum_plane", "const_GLdouble_ptr_equation"]).manual_state(),
        e("glColorMask", &["GLboolean_red", "GLboolean_green", "GLboolean_blue", "GLboolean_alpha"]),
        e("glColorMaterial", &["GLenum_face", "GLenum_mode"]),
        e("glCreateProgramObjectARB", &[])
            .manual_state()
            .returns("GLhandleARB"),
        e("glCreateShaderObjectARB", &["GLenum_type"])
            .manual_state()
            .returns("GLhandleARB"),
        e("glDeleteTextures", &["GLsizei_n", "const_GLuint_ptr_textures"]).manual_state(),
        e("glDepthFunc", &["GLenum_func"]),
        e("glDepthMask", &["GLboolean_flag"]),
        e("glDepthRange", &["GLclampd_zNear", "GLclampd_zFar"]),
        e("glDisable", &["GLenum_cap"]).manual_state(),
        e("glDisableClientState", &["GLenum_array"]),
        e("glEdgeFlag", &["GLboolean_flag"]),
        e("glEdgeFlagPointer", &["GLsizei_stride", "const_GLvoid_ptr_pointer"])
            .pointer_or_offset("pointer"),
        e("glEdgeFlagv", &["const_GLboolean_ptr_flag"]),
        e("glEnable", &["GLenum_cap"]).manual_state(),
        e("glEnableClientState", &["GLenum_array"]),
        e("glFeedbackBuffer", &["GLsizei_size", "GLenum_type", "GLfloat_ptr_buffer"]),
        e("glFogf", &["GLenum_pname", "GLfloat_param"]),
        e("glFogfv", &["GLenum_pname", "const_GLfloat_ptr_params"]),
        e("glFogi", &["GLenum_pname", "GLint_param"]),
        e("glFogiv", &["GLenum_pname", "const_GLint_ptr_params"]),
        e("glFrontFace", &["GLenum_mode"]),
        e(
            "glFrustum",
            &["GLdouble_left", "GLdouble_right", "GLdouble_bottom", "GLdouble_top", "GLdouble_zNear", "GLdouble_zFar"],
        ),
        e("glGenLists", &["GLsizei_range"]).returns("GLuint"),
        e("glGenTextures", &["GLsizei_n", "GLuint_ptr_textures"]).manual_state(),
        e("glPixelStoref", &["GLenum_pname", "GLfloat_param"]).manual_state(),
        e("glPixelStorei", &["GLenum_pname", "GLint_param"]).manual_state(),
        e("glPixelTransferf", &["GLenum_pname", "GLfloat_param"]).manual_state(),
        e("glPixelTransferi", &["GLenum_pname", "GLint_param"]).manual_state(),
        e("glPixelZoom", &["GLfloat_xfactor", "GLfloat_yfactor"]),
        e("glPointSize", &["GLfloat_size"]),
        e("glPolygonMode", &["GLenum_face", "GLenum_mode"]),
        e("glPolygonOffset", &["GLfloat_factor", "GLfloat_units"]),
        e("glPolygonStipple", &["const_GLubyte_ptr_mask"]),
        e(
            "glPrioritizeTextures",
            &["GLsizei_n", "const_GLuint_ptr_textures", "const_GLclampf_ptr_priorities"],
        ),
        e("glRasterPos2d", &["GLdouble_x", "GLdouble_y"]),
        e("glRasterPos2dv", &["const_GLdouble_ptr_v"]),
        e("glRasterPos2f", &["GLfloat_x", "GLfloat_y"]),
        e("glRasterPos2fv", &["const_GLfloat_ptr_v"]),
        e("glRasterPos2i", &["GLint_x", "GLint_y"]),
        e("glRasterPos2iv", &["const_GLint_ptr_v"]),
        e("glRasterPos3d", &["GLdouble_x", "GLdouble_y", "GLdouble_z"]),
        e("glRasterPos3dv", &["const_GLdouble_ptr_v"]),
        e("glRasterPos3f", &["GLfloat_x", "GLfloat_y", "GLfloat_z"]),
        e("glRasterPos3fv", &["const_GLfloat_ptr_v"]),
        e("glRasterPos4d", &["GLdouble_x", "GLdouble_y", "GLdouble_z", "GLdouble_w"]),
        e("glRasterPos4dv", &["const_GLdouble_ptr_v"]),
        e("glRasterPos4f", &["GLfloat_x", "GLfloat_y", "GLfloat_z", "GLfloat_w"]),
        e("glRasterPos4fv", &["const_GLfloat_ptr_v"]),
        e("glReadBuffer", &["GLenum_mode"]).manual_state(),
        e("glScissor", &["GLint_x", "GLint_y", "GLsizei_width", "GLsizei_height"]),
        e("glSelectBuffer", &["GLsizei_size", "GLuint_ptr_buffer"]),
        e("glShadeModel", &["GLenum_mode"]),
        e("glStencilFunc", &["GLenum_func", "GLint_ref", "GLuint_mask"]),
        e("glStencilMask", &["GLuint_mask"]),
        e("glStencilOp", &["GLenum_fail", "GLenum_zfail", "GLenum_zpass"]),
        e(
            "glTexCoordPointer",
            &["GLint_size", "GLenum_type", "GLsizei_stride", "const_GLvoid_ptr_pointer"],
        )
        .pointer_or_offset("pointer"),
        e("glTexEnvf", &["GLenum_target", "GLenum_pname", "GLfloat_param"]),
        e("glTexEnvfv", &["GLenum_target", "GLenum_pname", "const_GLfloat_ptr_params"]),
        e("glTexEnvi", &["GLenum_target", "GLenum_pname", "GLint_param"]),
        e("glTexEnviv", &["GLenum_target", "GLenum_pname", "const_GLint_ptr_params"]),
        e(
            "glTexImage1D",
            &["GLenum_target", "GLint_level", "GLint_internalformat", "GLsizei_width", "GLint_border", "GLenum_format", "GLenum_type", "const_GLvoid_ptr_pixels"],
        ),
        e(
            "glTexImage2D",
            &["GLenum_target", "GLint_level", "GLint_internalformat", "GLsizei_width", "GLsizei_height", "GLint_border", "GLenum_format", "GLenum_type", "const_GLvoid_ptr_pixels"],
        )
        .manual_state(),
        e(
            "glTexSubImage1D",
            &["GLenum_target", "GLint_level", "GLint_xoffset", "GLsizei_width", "GLenum_format", "GLenum_type", "const_GLvoid_ptr_pixels"],
        ),
        e(
            "glTexSubImage2D",
            &["GLenum_target", "GLint_level", "GLint_xoffset", "GLint_yoffset", "GLsizei_width", "GLsizei_height", "GLenum_format", "GLenum_type", "const_GLvoid_ptr_pixels"],
        )
        .manual_state(),
        e(
            "glVertexPointer",
            &["GLint_size", "GLenum_type", "GLsizei_stride", "const_GLvoid_ptr_pointer"],
        )
        .pointer_or_offset("pointer"),
        e("glViewport", &["GLint_x", "GLint_y", "GLsizei_width", "GLsizei_height"]),
        e("glTexParameterf", &["GLenum_target", "GLenum_pname", "GLfloat_param"]).manual_state(),
        e("glTexParameterfv", &["GLenum_target", "GLenum_pname", "const_GLfloat_ptr_params"])
            .manual_state(),
        e("glTexParameteri", &["GLenum_target", "GLenum_pname", "GLint_param"]).manual_state(),
        e("glTexParameteriv", &["GLenum_target", "GLenum_pname", "const_GLint_ptr_params"])
            .manual_state(),
    ]
}

fn extension_state() -> Vec<EntryDef> {
    vec![
        e("glActiveTexture", &["GLenum_texture"]),
        e("glAttachShader", &["GLuint_program", "GLuint_shader"]).manual_state(),
        e("glAttachObjectARB", &["GLhandleARB_a", "GLhandleARB_b"]).alias("glAttachShader"),
        e("glBindAttribLocation", &["GLuint_program", "GLuint_index", "const_GLchar_ptr_name"])
            .manual_state(),
        e(
            "glBindAttribLocationARB",
            &["GLhandleARB_program", "GLuint_index", "const_GLcharARB_ptr_name"],
        )
        .alias("glBindAttribLocation"),
        e("glBindBuffer", &["GLenum_target", "GLuint_buffer"])
            .manual_replay()
            .manual_state(),
        e("glBindBufferARB", &["GLenum_target", "GLuint_buffer"]).alias("glBindBuffer"),
        e("glBindMultiTextureEXT", &["GLenum_texunit", "GLenum_target", "GLuint_texture"])
            .manual_replay()
            .manual_state(),
        e("glBindProgramARB", &["GLenum_target", "GLuint_program"])
            .manual_replay()
            .manual_state(),
        e("glBlendColor", &["GLclampf_a", "GLclampf_b", "GLclampf_c", "GLclampf_d"]),
        e("glBlendEquation", &["GLenum_a"]),
        e(
            "glBufferData",
            &["GLenum_target", "GLsizeiptr_size", "const_GLvoid_ptr_data", "GLenum_usage"],
        )
        .manual_state(),
        e(
            "glBufferDataARB",
            &["GLenum_target", "GLsizeiptrARB_size", "const_GLvoid_ptr_data", "GLenum_usage"],
        )
        .alias("glBufferData"),
        e(
            "glBufferSubData",
            &["GLenum_target", "GLintptr_offset", "GLsizeiptr_size", "const_GLvoid_ptr_data"],
        )
        .manual_state(),
        e("glCompileShader", &["GLuint_shader"]).manual_state(),
        e("glCompileShaderARB", &["GLhandleARB_shader"]).alias("glCompileShader"),
        e(
            "glCompressedTexImage2D",
            &["GLenum_target", "GLint_level", "GLenum_internalformat", "GLsizei_width", "GLsizei_height", "GLint_border", "GLsizei_imagesize", "const_GLvoid_ptr_data"],
        )
        .manual_state(),
        e(
            "glCompressedTexImage3D",
            &["GLenum_target", "GLint_level", "GLenum_internalformat", "GLsizei_width", "GLsizei_height", "GLsizei_depth", "GLint_border", "GLsizei_imagesize", "const_GLvoid_ptr_data"],
        )
        .manual_state(),
        e("glDeleteBuffersARB", &["GLsizei_n", "const_GLuint_ptr_buffers"]).manual_state(),
        e("glDeleteObjectARB", &["GLhandleARB_a"]),
        e("glDeleteProgramsARB", &["GLsizei_n", "const_GLuint_ptr_programs"]).manual_state(),
        e("glDeleteQueriesARB", &["GLsizei_n", "const_GLuint_ptr_b"]),
        e("glDeleteShader", &["GLuint_a"]).manual_state(),
        e("glDetachShader", &["GLuint_program", "GLuint_shader"]).manual_state(),
        e("glDetachObjectARB", &["GLhandleARB_container", "GLhandleARB_attached"])
            .alias("glDetachShader"),
        e("glDisableVertexAttribArray", &["GLuint_index"]).manual_state(),
        e("glDrawBuffer", &["GLenum_mode"]).manual_state(),
        e("glEnableVertexAttribArray", &["GLuint_index"]).manual_state(),
        e("glGenBuffersARB", &["GLsizei_n", "GLuint_ptr_buffers"]).manual_state(),
        e("glGenProgramsARB", &["GLsizei_n", "GLuint_ptr_programs"]).manual_state(),
        e("glGenQueriesARB", &["GLsizei_n", "GLuint_ptr_queries"]),
        e("glLinkProgram", &["GLuint_program"]).manual_state(),
        e("glLinkProgramARB", &["GLhandleARB_program"]).alias("glLinkProgram"),
        e(
            "glProgramStringARB",
            &["GLenum_target", "GLenum_format", "GLsizei_len", "const_GLvoid_ptr_string"],
        )
        .manual_state(),
        e(
            "glTexImage3D",
            &["GLenum_target", "GLint_level", "GLint_internalFormat", "GLsizei_width", "GLsizei_height", "GLsizei_depth", "GLint_border", "GLenum_format", "GLenum_type", "const_GLvoid_ptr_data"],
        )
        .manual_state(),
        e("glUniform1f", &["GLint_location", "GLfloat_v0"])
            .manual_replay()
            .manual_state(),
        e("glUniform1i", &["GLint_location", "GLint_v0"])
            .manual_replay()
            .manual_state(),
        e("glUniform1iARB", &["GLint_location", "GLint_v0"]).alias("glUniform1i"),
        e("glUniform4fv", &["GLint_location", "GLsizei_count", "const_GLfloat_ptr_value"])
            .manual_replay()
            .manual_state(),
        e("glUnmapBuffer", &["GLenum_target"])
            .manual_detour()
            .manual_state()
            .returns("GLboolean"),
        e("glUseProgram", &["GLuint_program"]).manual_replay().manual_restore(),
        e(
            "glVertexAttribPointer",
            &["GLuint_index", "GLint_size", "GLenum_type", "GLboolean_normalized", "GLsizei_stride", "const_GLvoid_ptr_pointer"],
        )
        .pointer_or_offset("pointer"),
        e("glClientActiveTexture", &["GLenum_a"]),
        e(
            "glProgramEnvParameters4fvEXT",
            &["GLenum_target", "GLuint_index", "GLsizei_count", "const_GLfloat_ptr_params"],
        ),
        e("glStencilOpSeparate", &["GLenum_a", "GLenum_b", "GLenum_c", "GLenum_d"]),
        e("glStencilFuncSeparate", &["GLenum_a", "GLenum_b", "GLint_c", "GLuint_d"]),
        e("glDeleteRenderbuffersEXT", &["GLsizei_n", "const_GLuint_ptr_b"])
            .alias("glDeleteRenderbuffers"),
        e("glFramebufferRenderbufferEXT", &["GLenum_a", "GLenum_b", "GLenum_c", "GLuint_d"])
            .alias("glFramebufferRenderbuffer"),
        e(
            "glFramebufferTexture2DEXT",
            &["GLenum_a", "GLenum_b", "GLenum_c", "GLuint_d", "GLint_e"],
        )
        .alias("glFramebufferTexture2D"),
        e(
            "glFramebufferTexture3DEXT",
            &["GLenum_a", "GLenum_b", "GLenum_c", "GLuint_d", "GLint_e", "GLint_f"],
        )
        .alias("glFramebufferTexture3D"),
        // TODO: the EXT gen entries should get their own packets so a replay
        // can tell an EXT framebuffer from a core one.
        e("glGenFramebuffersEXT", &["GLsizei_a", "GLuint_ptr_b"]).alias("glGenFramebuffers"),
        e("glGenRenderbuffersEXT", &["GLsizei_a", "GLuint_ptr_b"]).alias("glGenRenderbuffers"),
        e("glDeleteFramebuffersEXT", &["GLsizei_n", "const_GLuint_ptr_framebuffers"])
            .alias("glDeleteFramebuffers"),
        e(
            "glRenderbufferStorageMultisampleEXT",
            &["GLenum_a", "GLsizei_b", "GLenum_c", "GLsizei_d", "GLsizei_e"],
        )
        .alias("glRenderbufferStorageMultisample"),
        e(
            "glColorMaskIndexedEXT",
            &["GLuint_a", "GLboolean_b", "GLboolean_c", "GLboolean_d", "GLboolean_e"],
        ),
        e("glEnableIndexedEXT", &["GLenum_a", "GLuint_b"]),
        e("glDisableIndexedEXT", &["GLenum_a", "GLuint_b"]),
        e("glUniformBufferEXT", &["GLuint_a", "GLint_b", "GLuint_c"]),
        e("glBufferParameteriAPPLE", &["GLenum_a", "GLenum_b", "GLint_c"]),
        e("glBindFramebuffer", &["GLenum_target", "GLuint_framebuffer"])
            .manual_replay()
            .manual_state(),
        e("glBindFramebufferEXT", &["GLenum_target", "GLuint_framebuffer"])
            .alias("glBindFramebuffer"),
        e("glBindRenderbuffer", &["GLenum_target", "GLuint_renderbuffer"])
            .manual_replay()
            .manual_state(),
        e("glBindRenderbufferEXT", &["GLenum_target", "GLuint_renderbuffer"])
            .alias("glBindRenderbuffer"),
        e("glDeleteRenderbuffers", &["GLsizei_n", "const_GLuint_ptr_b"]).manual_state(),
        e(
            "glFramebufferRenderbuffer",
            &["GLenum_target", "GLenum_attachment", "GLenum_renderbuffertarget", "GLuint_renderbuffer"],
        )
        .manual_replay()
        .manual_state(),
        e(
            "glFramebufferTexture2D",
            &["GLenum_target", "GLenum_attachment", "GLenum_textarget", "GLuint_texture", "GLint_level"],
        )
        .manual_replay()
        .manual_state(),
        e(
            "glFramebufferTexture3D",
            &["GLenum_target", "GLenum_attachment", "GLenum_textarget", "GLuint_texture", "GLint_level", "GLint_layer"],
        )
        .manual_replay()
        .manual_state(),
        e("glGenFramebuffers", &["GLsizei_n", "GLuint_ptr_ids"]).manual_state(),
        e("glGenRenderbuffers", &["GLsizei_n", "GLuint_ptr_renderbuffers"]).manual_state(),
        e("glGenSamplers", &["GLsizei_n", "GLuint_ptr_samplers"]).manual_state(),
        e("glDeleteSamplers", &["GLsizei_n", "const_GLuint_ptr_samplers"])
            .manual_replay()
            .manual_state(),
        e("glBindSampler", &["GLuint_unit", "GLuint_sampler"])
            .manual_replay()
            .manual_state(),
        e("glSamplerParameteri", &["GLuint_sampler", "GLenum_pname", "GLint_param"])
            .manual_replay()
            .manual_state(),
        e("glSamplerParameterf", &["GLuint_sampler", "GLenum_pname", "GLfloat_param"])
            .manual_replay()
            .manual_state(),
        e(
            "glSamplerParameterfv",
            &["GLuint_sampler", "GLenum_pname", "const_GLfloat_ptr_params"],
        )
        .manual_replay()
        .manual_state(),
        e("glGetUniformLocation", &["GLuint_program", "const_GLchar_ptr_name"])
            .manual_state()
            .returns("GLint"),
        e(
            "glGetUniformLocationARB",
            &["GLhandleARB_program", "const_GLcharARB_ptr_name"],
        )
        .manual_state()
        .alias("glGetUniformLocation")
        .returns("GLint"),
        e("glDeleteFramebuffers", &["GLsizei_n", "const_GLuint_ptr_framebuffers"]).manual_state(),
        e(
            "glRenderbufferStorageMultisample",
            &["GLenum_target", "GLsizei_samples", "GLenum_internalformat", "GLsizei_width", "GLsizei_height"],
        )
        .manual_state(),
        e("glMapBufferARB", &["GLenum_target", "GLenum_access"])
            .manual_detour()
            .manual_state()
            .returns("GLvoid_ptr"),
        e(
            "glMapBufferRange",
            &["GLenum_target", "GLintptr_offset", "GLsizeiptr_length", "GLbitfield_access"],
        )
        .manual_detour()
        .manual_state()
        .returns("GLvoid_ptr"),
        e(
            "glFlushMappedBufferRange",
            &["GLenum_target", "GLintptr_offset", "GLsizeiptr_length"],
        )
        .manual_detour()
        .manual_state(),
        e(
            "glShaderSource",
            &["GLuint_shader", "GLsizei_count", "const_GLchar_ptr_ptr_string", "const_GLint_ptr_length"],
        )
        .manual_state(),
        e(
            "glShaderSourceARB",
            &["GLhandleARB_shader", "GLsizei_count", "const_GLcharARB_ptr_ptr_string", "const_GLint_ptr_length"],
        )
        .alias("glShaderSource"),
    ]
}

fn actions() -> Bin {
    Bin::of(vec![
        e(
            "glAreTexturesResident",
            &["GLsizei_n", "const_GLuint_ptr_textures", "GLboolean_ptr_residences"],
        )
        .returns("GLboolean"),
        e(
            "glBitmap",
            &["GLsizei_width", "GLsizei_height", "GLfloat_xorig", "GLfloat_yorig", "GLfloat_xmove", "GLfloat_ymove", "const_GLubyte_ptr_bitmap"],
        ),
        e("glCallList", &["GLuint_list"]),
        e("glCallLists", &["GLsizei_n", "GLenum_type", "const_GLvoid_ptr_lists"]),
        e("glClear", &["GLbitfield_mask"]),
        e(
            "glColorPointer",
            &["GLint_size", "GLenum_type", "GLsizei_stride", "const_GLvoid_ptr_pointer"],
        )
        .pointer_or_offset("pointer"),
        e("glCopyPixels", &["GLint_x", "GLint_y", "GLsizei_width", "GLsizei_height", "GLenum_type"]),
        e(
            "glCopyTexImage2D",
            &["GLenum_target", "GLint_level", "GLenum_internalFormat", "GLint_x", "GLint_y", "GLsizei_width", "GLsizei_height", "GLint_border"],
        ),
        e(
            "glCopyTexSubImage2D",
            &["GLenum_target", "GLint_level", "GLint_xoffset", "GLint_yoffset", "GLint_x", "GLint_y", "GLsizei_width", "GLsizei_height"],
        ),
        e("glCullFace", &["GLenum_mode"]),
        e("glDeleteLists", &["GLuint_list", "GLsizei_range"]),
        e("glDrawArrays", &["GLenum_mode", "GLint_first", "GLsizei_count"]),
        e(
            "glDrawElements",
            &["GLenum_mode", "GLsizei_count", "GLenum_type", "const_GLvoid_ptr_indices"],
        ),
        e(
            "glDrawPixels",
            &["GLsizei_width", "GLsizei_height", "GLenum_format", "GLenum_type", "const_GLvoid_ptr_pixels"],
        ),
        e("glEnd", &[]),
        e("glEndList", &[]),
        e("glFinish", &[]),
        e("glFlush", &[]),
        e("glGetBooleanv", &["GLenum_pname", "GLboolean_ptr_params"]),
        e("glGetClipPlane", &["GLenum_plane", "GLdouble_ptr_equation"]),
        e("glGetDoublev", &["GLenum_pname", "GLdouble_ptr_params"]),
        e("glGetError", &[]).returns("GLenum"),
        e("glGetFloatv", &["GLenum_pname", "GLfloat_ptr_params"]).public_real(),
        e("glGetIntegerv", &["GLenum_pname", "GLint_ptr_params"]).public_real(),
        e("glGetShaderiv", &["GLuint_shader", "GLenum_pname", "GLint_ptr_params"]).public_real(),
        e("glGetProgramiv", &["GLuint_program", "GLenum_pname", "GLint_ptr_params"]).public_real(),
        e("glGetString", &["GLenum_name"]).returns("const_GLubyte_ptr"),
        e("glIsEnabled", &["GLenum_cap"]).returns("GLboolean"),
        e("glIsList", &["GLuint_list"]).returns("GLboolean"),
        e("glIsTexture", &["GLuint_texture"]).returns("GLboolean"),
        e(
            "glReadPixels",
            &["GLint_x", "GLint_y", "GLsizei_width", "GLsizei_height", "GLenum_format", "GLenum_type", "GLvoid_ptr_pixels"],
        ),
        e("glRenderMode", &["GLenum_mode"]).returns("GLint"),
        e("wglMakeCurrent", &["HDC_hdc", "HGLRC_hglrc"])
            .manual_detour()
            .static_hook()
            .returns("BOOL"),
        e(
            "glDrawRangeElements",
            &["GLenum_mode", "GLuint_start", "GLuint_end", "GLsizei_count", "GLenum_type", "const_GLvoid_ptr_indices"],
        ),
        e(
            "glDrawRangeElementsBaseVertex",
            &["GLenum_mode", "GLuint_start", "GLuint_end", "GLsizei_count", "GLenum_type", "const_GLvoid_ptr_indices", "GLint_basevertex"],
        ),
        e("glGetCompressedTexImage", &["GLenum_a", "GLint_b", "GLvoid_ptr_c"]),
        e("glGetObjectParameterivARB", &["GLhandleARB_a", "GLenum_b", "GLint_ptr_c"]),
        e("glCheckFramebufferStatusEXT", &["GLenum_a"]).returns("GLenum"),
        e(
            "glBlitFramebufferEXT",
            &["GLint_srcX0", "GLint_srcY0", "GLint_srcX1", "GLint_srcY1", "GLint_dstX0", "GLint_dstY0", "GLint_dstX1", "GLint_dstY1", "GLbitfield_mask", "GLenum_filter"],
        )
        .manual_state(),
        e("glSetFenceAPPLE", &["GLuint_a"]),
        e("glFinishFenceAPPLE", &["GLuint_a"]),
        e("glDeleteFencesAPPLE", &["GLsizei_n", "const_GLuint_ptr_b"]),
        e("glGenFencesAPPLE", &["GLsizei_a", "GLuint_ptr_b"]),
        e("glTestFenceNV", &["GLuint_a"]).returns("GLboolean"),
        e("glSetFenceNV", &["GLuint_a", "GLenum_b"]),
        e("glFinishFenceNV", &["GLuint_a"]),
        e("glDeleteFencesNV", &["GLsizei_n", "const_GLuint_ptr_b"]),
        e("glGenFencesNV", &["GLsizei_a", "GLuint_ptr_b"]),
        e("glGetSynciv", &["GLsync_a", "GLenum_b", "GLsizei_c", "GLsizei_ptr_d", "GLint_ptr_e"]),
        e("glClientWaitSync", &["GLsync_a", "GLbitfield_b", "GLuint64_c"]).returns("GLenum"),
        e("glWaitSync", &["GLsync_a", "GLbitfield_b", "GLuint64_c"]),
        e("glDeleteSync", &["GLsync_a"]),
        e("glFenceSync", &["GLenum_a", "GLbitfield_b"]).returns("GLsync"),
        e("glGetBooleanIndexedvEXT", &["GLenum_a", "GLuint_b", "GLboolean_ptr_c"]),
        e("glGetUniformBufferSizeEXT", &["GLenum_a", "GLenum_b"]).returns("GLint"),
        e("glGetUniformOffsetEXT", &["GLenum_a", "GLenum_b"]).returns("GLintptr"),
        e("glFlushMappedBufferRangeAPPLE", &["GLenum_a", "GLintptr_b", "GLsizeiptr_c"]),
        e("glBeginQueryARB", &["GLenum_a", "GLuint_b"]),
        e("glEndQueryARB", &["GLenum_a"]),
        e("glGetQueryObjectivARB", &["GLuint_id", "GLenum_pname", "GLint_ptr_params"])
            .manual_replay(),
        e("glGetQueryObjectuivARB", &["GLuint_id", "GLenum_pname", "GLuint_ptr_params"])
            .manual_replay(),
        e("glTextureRangeAPPLE", &["GLenum_a", "GLsizei_b", "void_ptr_c"]),
        e("glGetTexParameterPointervAPPLE", &["GLenum_a", "GLenum_b", "void_ptr_c"]),
        e("glCheckFramebufferStatus", &["GLenum_a"]).returns("GLenum"),
        e(
            "glBlitFramebuffer",
            &["GLint_srcX0", "GLint_srcY0", "GLint_srcX1", "GLint_srcY1", "GLint_dstX0", "GLint_dstY0", "GLint_dstX1", "GLint_dstY1", "GLbitfield_mask", "GLenum_filter"],
        )
        .manual_state(),
        e("glStringMarkerGREMEDY", &["GLsizei_a", "const_void_ptr_b"]),
        e("SwapBuffers", &["HDC_hdc"])
            .manual_replay()
            .manual_detour()
            .static_hook()
            .returns("BOOL"),
    ])
}

fn unsupported() -> Bin {
    Bin::of(vec![
        e("glHint", &["GLenum_target", "GLenum_mode"]),
        e("glIndexMask", &["GLuint_mask"]),
        e("glIndexPointer", &["GLenum_type", "GLsizei_stride", "const_GLvoid_ptr_pointer"]),
        e("glIndexd", &["GLdouble_c"]),
        e("glIndexdv", &["const_GLdouble_ptr_c"]),
        e("glIndexf", &["GLfloat_c"]),
        e("glIndexfv", &["const_GLfloat_ptr_c"]),
        e("glIndexi", &["GLint_c"]),
        e("glIndexiv", &["const_GLint_ptr_c"]),
        e("glIndexs", &["GLshort_c"]),
        e("glIndexsv", &["const_GLshort_ptr_c"]),
        e("glIndexub", &["GLubyte_c"]),
        e("glIndexubv", &["const_GLubyte_ptr_c"]),
        e(
            "glInterleavedArrays",
            &["GLenum_format", "GLsizei_stride", "const_GLvoid_ptr_pointer"],
        ),
        e("glLightModelf", &["GLenum_pname", "GLfloat_param"]),
        e("glLightModelfv", &["GLenum_pname", "const_GLfloat_ptr_params"]),
        e("glLightModeli", &["GLenum_pname", "GLint_param"]),
        e("glLightModeliv", &["GLenum_pname", "const_GLint_ptr_params"]),
        e("glLightf", &["GLenum_light", "GLenum_pname", "GLfloat_param"]),
        e("glLightfv", &["GLenum_light", "GLenum_pname", "const_GLfloat_ptr_params"]),
        e("glLighti", &["GLenum_light", "GLenum_pname", "GLint_param"]),
        e("glLightiv", &["GLenum_light", "GLenum_pname", "const_GLint_ptr_params"]),
        e("glLineStipple", &["GLint_factor", "GLushort_pattern"]),
        e("glLineWidth", &["GLfloat_width"]),
        e("glListBase", &["GLuint_base"]),
        e("glLogicOp", &["GLenum_opcode"]),
        e("glMaterialf", &["GLenum_face", "GLenum_pname", "GLfloat_param"]),
        e("glMaterialfv", &["GLenum_face", "GLenum_pname", "const_GLfloat_ptr_params"]),
        e("glMateriali", &["GLenum_face", "GLenum_pname", "GLint_param"]),
        e("glMaterialiv", &["GLenum_face", "GLenum_pname", "const_GLint_ptr_params"]),
        e("glMatrixMode", &["GLenum_mode"]),
        e("glNormalPointer", &["GLenum_type", "GLsizei_stride", "const_GLvoid_ptr_pointer"]),
        e(
            "glOrtho",
            &["GLdouble_left", "GLdouble_right", "GLdouble_bottom", "GLdouble_top", "GLdouble_zNear", "GLdouble_zFar"],
        ),
        e("glPassThrough", &["GLfloat_token"]),
        e("glPixelMapfv", &["GLenum_map", "GLsizei_mapsize", "const_GLfloat_ptr_values"]),
        e("glPixelMapuiv", &["GLenum_map", "GLsizei_mapsize", "const_GLuint_ptr_values"]),
        e("glPixelMapusv", &["GLenum_map", "GLsizei_mapsize", "const_GLushort_ptr_values"]),
        e("glArrayElement", &["GLint_i"]),
        e("glBegin", &["GLenum_mode"]),
        e("glColor3f", &["GLfloat_red", "GLfloat_green", "GLfloat_blue"]),
        e("glColor3fv", &["const_GLfloat_ptr_v"]),
        e("glColor3ub", &["GLubyte_red", "GLubyte_green", "GLubyte_blue"]),
        e("glColor3ubv", &["const_GLubyte_ptr_v"]),
        e("glColor4f", &["GLfloat_red", "GLfloat_green", "GLfloat_blue", "GLfloat_alpha"]),
        e("glColor4fv", &["const_GLfloat_ptr_v"]),
        e("glColor4ub", &["GLubyte_red", "GLubyte_green", "GLubyte_blue", "GLubyte_alpha"]),
        e("glColor4ubv", &["const_GLubyte_ptr_v"]),
        e("glEvalCoord1d", &["GLdouble_u"]),
        e("glEvalCoord1dv", &["const_GLdouble_ptr_u"]),
        e("glEvalCoord1f", &["GLfloat_u"]),
        e("glEvalCoord1fv", &["const_GLfloat_ptr_u"]),
        e("glEvalCoord2d", &["GLdouble_u", "GLdouble_v"]),
        e("glEvalCoord2dv", &["const_GLdouble_ptr_u"]),
        e("glEvalCoord2f", &["GLfloat_u", "GLfloat_v"]),
        e("glEvalCoord2fv", &["const_GLfloat_ptr_u"]),
        e("glEvalMesh2", &["GLenum_mode", "GLint_i1", "GLint_i2", "GLint_j1", "GLint_j2"]),
        e("glGetLightfv", &["GLenum_light", "GLenum_pname", "GLfloat_ptr_params"]),
        e("glGetLightiv", &["GLenum_light", "GLenum_pname", "GLint_ptr_params"]),
        e("glGetMaterialfv", &["GLenum_face", "GLenum_pname", "GLfloat_ptr_params"]),
        e("glGetMaterialiv", &["GLenum_face", "GLenum_pname", "GLint_ptr_params"]),
        e("glGetPixelMapfv", &["GLenum_map", "GLfloat_ptr_values"]),
        e("glGetPointerv", &["GLenum_pname", "GLvoid_ptr_ptr_params"]),
        e("glGetPolygonStipple", &["GLubyte_ptr_mask"]),
        e("glGetTexEnvfv", &["GLenum_target", "GLenum_pname", "GLfloat_ptr_params"]),
        e("glGetTexEnviv", &["GLenum_target", "GLenum_pname", "GLint_ptr_params"]),
        e(
            "glGetTexImage",
            &["GLenum_target", "GLint_level", "GLenum_format", "GLenum_type", "GLvoid_ptr_pixels"],
        ),
        e(
            "glGetTexLevelParameteriv",
            &["GLenum_target", "GLint_level", "GLenum_pname", "GLint_ptr_params"],
        ),
        e("glGetTexParameterfv", &["GLenum_target", "GLenum_pname", "GLfloat_ptr_params"]),
        e("glGetTexParameteriv", &["GLenum_target", "GLenum_pname", "GLint_ptr_params"]),
        e("glInitNames", &[]),
        e("glLoadIdentity", &[]),
        e("glLoadMatrixd", &["const_GLdouble_ptr_m"]),
        e("glLoadMatrixf", &["const_GLfloat_ptr_m"]),
        e("glLoadName", &["GLuint_name"]),
        e(
            "glMap1f",
            &["GLenum_target", "GLfloat_u1", "GLfloat_u2", "GLint_stride", "GLint_order", "const_GLfloat_ptr_points"],
        ),
        e(
            "glMap2f",
            &["GLenum_target", "GLfloat_u1", "GLfloat_u2", "GLint_ustride", "GLint_uorder", "GLfloat_v1", "GLfloat_v2", "GLint_vstride", "GLint_vorder", "const_GLfloat_ptr_points"],
        ),
        e("glMapGrid2f", &["GLint_un", "GLfloat_u1", "GLfloat_u2", "GLint_vn", "GLfloat_v1", "GLfloat_v2"]),
        e("glMultMatrixd", &["const_GLdouble_ptr_m"]),
        e("glMultMatrixf", &["const_GLfloat_ptr_m"]),
        e("glNewList", &["GLuint_list", "GLenum_mode"]),
        e("glNormal3f", &["GLfloat_nx", "GLfloat_ny", "GLfloat_nz"]),
        e("glNormal3fv", &["const_GLfloat_ptr_v"]),
        e("glPopAttrib", &[]),
        e("glPopClientAttrib", &[]),
        e("glPopMatrix", &[]),
        e("glPopName", &[]),
        e("glPushAttrib", &["GLbitfield_mask"]),
        e("glPushClientAttrib", &["GLbitfield_mask"]),
        e("glPushMatrix", &[]),
        e("glPushName", &["GLuint_name"]),
        e("glRectf", &["GLfloat_x1", "GLfloat_y1", "GLfloat_x2", "GLfloat_y2"]),
        e("glRectfv", &["const_GLfloat_ptr_v1", "const_GLfloat_ptr_v2"]),
        e("glRecti", &["GLint_x1", "GLint_y1", "GLint_x2", "GLint_y2"]),
        e("glRectiv", &["const_GLint_ptr_v1", "const_GLint_ptr_v2"]),
        e("glRotatef", &["GLfloat_angle", "GLfloat_x", "GLfloat_y", "GLfloat_z"]),
        e("glScalef", &["GLfloat_x", "GLfloat_y", "GLfloat_z"]),
        e("glTexCoord1f", &["GLfloat_s"]),
        e("glTexCoord1fv", &["const_GLfloat_ptr_v"]),
        e("glTexCoord2f", &["GLfloat_s", "GLfloat_t"]),
        e("glTexCoord2fv", &["const_GLfloat_ptr_v"]),
        e("glTexCoord3f", &["GLfloat_s", "GLfloat_t", "GLfloat_r"]),
        e("glTexCoord3fv", &["const_GLfloat_ptr_v"]),
        e("glTexCoord4f", &["GLfloat_s", "GLfloat_t", "GLfloat_r", "GLfloat_q"]),
        e("glTexCoord4fv", &["const_GLfloat_ptr_v"]),
        e("glTexGenf", &["GLenum_coord", "GLenum_pname", "GLfloat_param"]),
        e("glTexGenfv", &["GLenum_coord", "GLenum_pname", "const_GLfloat_ptr_params"]),
        e("glTexGeni", &["GLenum_coord", "GLenum_pname", "GLint_param"]),
        e("glTexGeniv", &["GLenum_coord", "GLenum_pname", "const_GLint_ptr_params"]),
        e("glTranslatef", &["GLfloat_x", "GLfloat_y", "GLfloat_z"]),
        e("glVertex2f", &["GLfloat_x", "GLfloat_y"]),
        e("glVertex2fv", &["const_GLfloat_ptr_v"]),
        e("glVertex3f", &["GLfloat_x", "GLfloat_y", "GLfloat_z"]),
        e("glVertex3fv", &["const_GLfloat_ptr_v"]),
        e("glVertex3i", &["GLint_x", "GLint_y", "GLint_z"]),
        e("glVertex3iv", &["const_GLint_ptr_v"]),
        e("glVertex4f", &["GLfloat_x", "GLfloat_y", "GLfloat_z", "GLfloat_w"]),
        e("glVertex4fv", &["const_GLfloat_ptr_v"]),
    ])
}

#[cfg(test)]
mod tests {
    #[test]
    fn shipped_catalog_ingests_cleanly() {
        let registry = super::catalog().into_registry().unwrap();
        assert!(registry.entries.len() > 250);
        assert_eq!(registry.state_classes.len(), 1);
        assert_eq!(registry.state_classes[0].name, "ContextState");
        // Canonical order is sorted and duplicate-free.
        for pair in registry.entries.windows(2) {
            assert!(pair[0].name < pair[1].name);
        }
    }

    #[test]
    fn aliases_point_at_real_entries() {
        let registry = super::catalog().into_registry().unwrap();
        for entry in &registry.entries {
            if let Some(alias) = &entry.alias {
                assert!(
                    registry.entries.iter().any(|e| &e.name == alias),
                    "{} aliases unknown entry {}",
                    entry.name,
                    alias
                );
            }
        }
    }
}
